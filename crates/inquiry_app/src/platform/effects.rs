use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use chrono::Local;
use inquiry_client::{ClientEvent, ClientHandle, ExportWriter};
use inquiry_core::{Effect, Msg, NoticeLevel, Notification};
use inquiry_logging::{inquiry_debug, inquiry_error, inquiry_info, inquiry_warn};

use super::ui::render::{self, Style};

const EVENT_WAIT: Duration = Duration::from_millis(50);

pub struct EffectRunner {
    client: ClientHandle,
    exporter: ExportWriter,
    style: Style,
}

impl EffectRunner {
    pub fn new(
        client: ClientHandle,
        exporter: ExportWriter,
        style: Style,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let runner = Self {
            client,
            exporter,
            style,
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit { generation, file } => {
                    inquiry_info!(
                        "Submit generation={} file={} size={}",
                        generation,
                        file.name,
                        file.size
                    );
                    self.client.submit(generation, file.name, file.location);
                }
                Effect::SchedulePoll {
                    generation,
                    job_id,
                    delay,
                } => {
                    self.client.schedule_poll(generation, job_id, delay);
                }
                Effect::CancelPolling { generation } => {
                    self.client.cancel(generation);
                }
                Effect::LoadHistory { request } => {
                    self.client.load_history(request);
                }
                Effect::ExportCsv {
                    contents,
                    row_count,
                } => self.export(&contents, row_count),
                Effect::Notify(notification) => self.show(&notification),
            }
        }
    }

    fn export(&self, contents: &str, row_count: usize) {
        let today = Local::now().date_naive();
        match self.exporter.write_csv(today, contents) {
            Ok(path) => self.show(&Notification::new(
                NoticeLevel::Success,
                "Export Complete",
                format!("Wrote {} rows to {}", row_count, path.display()),
            )),
            Err(err) => {
                inquiry_error!("Export to {:?} failed: {}", self.exporter.dir(), err);
                self.show(&Notification::new(
                    NoticeLevel::Error,
                    "Export Failed",
                    err.to_string(),
                ));
            }
        }
    }

    fn show(&self, notification: &Notification) {
        println!("{}", render::notice(notification, self.style));
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        thread::spawn(move || forward_events(|| client.recv_timeout(EVENT_WAIT), &msg_tx));
    }
}

/// Relays client events as messages until either side goes away.
fn forward_events(
    mut next_event: impl FnMut() -> Result<ClientEvent, RecvTimeoutError>,
    msg_tx: &mpsc::Sender<Msg>,
) {
    loop {
        match next_event() {
            Ok(event) => {
                if msg_tx.send(map_event(event)).is_err() {
                    inquiry_debug!("Message loop closed; stopping event relay");
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                inquiry_error!("Client event channel closed");
                return;
            }
        }
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Submitted { generation, result } => match result {
            Ok(handle) => Msg::SubmitSucceeded {
                generation,
                job_id: handle.job_id,
            },
            Err(err) => {
                inquiry_warn!("Submission {} failed: {}", generation, err);
                Msg::SubmitFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        ClientEvent::Polled {
            generation,
            job_id,
            result,
        } => match result {
            Ok(snapshot) => Msg::PollSucceeded {
                generation,
                job_id,
                snapshot,
            },
            Err(err) => Msg::PollFailed {
                generation,
                job_id,
                message: err.to_string(),
            },
        },
        ClientEvent::HistoryLoaded { request, result } => match result {
            Ok(records) => Msg::HistoryLoaded { request, records },
            Err(err) => Msg::HistoryFailed {
                request,
                message: err.to_string(),
            },
        },
    }
}
