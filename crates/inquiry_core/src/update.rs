use inquiry_logging::{inquiry_info, inquiry_warn};

use crate::export::results_to_csv;
use crate::state::PollOutcome;
use crate::{validate, AppState, Effect, Msg, NoticeLevel, Notification};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => vec![Effect::LoadHistory {
            request: state.begin_history_load(),
        }],
        Msg::FileChosen(file) => {
            if let Err(error) = validate(&file) {
                inquiry_warn!("Rejected {}: {}", file.name, error);
                let message = error.to_string();
                state.reject_file(error);
                return (
                    state,
                    vec![Effect::Notify(Notification::new(
                        NoticeLevel::Error,
                        "Invalid File",
                        message,
                    ))],
                );
            }

            let (superseded, generation) = state.begin_submission(&file.name);
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = superseded {
                effects.push(Effect::CancelPolling {
                    generation: previous,
                });
            }
            effects.push(Effect::Submit { generation, file });
            effects
        }
        Msg::SubmitSucceeded { generation, job_id } => {
            if state.accept_job(generation, &job_id) {
                vec![Effect::SchedulePoll {
                    generation,
                    delay: state.poll_interval(),
                    job_id,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::SubmitFailed {
            generation,
            message,
        } => {
            if state.fail_submission(generation, &message) {
                vec![Effect::Notify(Notification::new(
                    NoticeLevel::Error,
                    "Upload Failed",
                    message,
                ))]
            } else {
                Vec::new()
            }
        }
        Msg::PollSucceeded {
            generation,
            job_id,
            snapshot,
        } => match state.apply_snapshot(generation, &job_id, snapshot) {
            PollOutcome::Stale => Vec::new(),
            PollOutcome::Continue => vec![Effect::SchedulePoll {
                generation,
                delay: state.poll_interval(),
                job_id,
            }],
            PollOutcome::Completed {
                result_count,
                file_name,
            } => vec![
                Effect::Notify(Notification::new(
                    NoticeLevel::Success,
                    "Processing Complete",
                    format!("Processed {result_count} inquiries from {file_name}"),
                )),
                Effect::LoadHistory {
                    request: state.begin_history_load(),
                },
            ],
            PollOutcome::Failed { message } => vec![Effect::Notify(Notification::new(
                NoticeLevel::Error,
                "Processing Failed",
                message,
            ))],
        },
        Msg::PollFailed {
            generation,
            job_id,
            message,
        } => {
            if state.is_current_poll(generation, &job_id) {
                inquiry_warn!("Poll for job {} failed, retrying: {}", job_id, message);
                vec![Effect::SchedulePoll {
                    generation,
                    delay: state.poll_interval(),
                    job_id,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::HistoryLoaded { request, records } => {
            state.apply_history(request, records);
            Vec::new()
        }
        Msg::HistoryFailed { request, message } => {
            state.history_failed(request, &message);
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.select_page(page);
            Vec::new()
        }
        Msg::NextPage => {
            let next = state.current_page() + 1;
            state.select_page(next);
            Vec::new()
        }
        Msg::PreviousPage => {
            let previous = state.current_page().saturating_sub(1);
            state.select_page(previous);
            Vec::new()
        }
        Msg::ExportRequested => {
            let results = state.results();
            if results.is_empty() {
                vec![Effect::Notify(Notification::new(
                    NoticeLevel::Info,
                    "Nothing to Export",
                    "There are no results to export yet",
                ))]
            } else {
                inquiry_info!("Exporting {} results", results.len());
                vec![Effect::ExportCsv {
                    contents: results_to_csv(results),
                    row_count: results.len(),
                }]
            }
        }
        Msg::Detached => match state.detach() {
            Some(generation) => vec![Effect::CancelPolling { generation }],
            None => Vec::new(),
        },
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
