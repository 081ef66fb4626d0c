#![allow(dead_code)]

use std::sync::Once;

use inquiry_core::{
    update, AppState, Effect, Generation, InquiryRecord, Msg, ProgressSnapshot, RemoteStatus,
    SelectedFile,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(inquiry_logging::initialize_for_tests);
}

pub fn csv_file(name: &str) -> SelectedFile {
    SelectedFile::new(name, 2048, format!("/data/{name}"))
}

pub fn records(count: usize) -> Vec<InquiryRecord> {
    (0..count)
        .map(|i| InquiryRecord::new(format!("user{i}@example.com"), "General", format!("reply {i}")))
        .collect()
}

pub fn snapshot(
    processed: u64,
    total: u64,
    status: RemoteStatus,
    results: Vec<InquiryRecord>,
) -> ProgressSnapshot {
    ProgressSnapshot {
        processed,
        total,
        status,
        results,
        error: None,
    }
}

pub fn submit_generation(effects: &[Effect]) -> Generation {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Submit { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("submit effect")
}

/// Picks `name`, then has the service accept it as `job_id`.
pub fn start_job(state: AppState, name: &str, job_id: &str) -> (AppState, Generation) {
    let (state, effects) = update(state, Msg::FileChosen(csv_file(name)));
    let generation = submit_generation(&effects);
    let (state, _) = update(
        state,
        Msg::SubmitSucceeded {
            generation,
            job_id: job_id.to_string(),
        },
    );
    (state, generation)
}

pub fn poll(
    state: AppState,
    generation: Generation,
    job_id: &str,
    snapshot: ProgressSnapshot,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::PollSucceeded {
            generation,
            job_id: job_id.to_string(),
            snapshot,
        },
    )
}

pub fn has_schedule_poll(effects: &[Effect]) -> bool {
    effects
        .iter()
        .any(|effect| matches!(effect, Effect::SchedulePoll { .. }))
}

pub fn notifications(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Notify(_)))
        .count()
}
