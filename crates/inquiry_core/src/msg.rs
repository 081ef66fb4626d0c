use crate::{Generation, HistoryRecord, JobId, ProgressSnapshot, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The front end came up; history is loaded once here.
    Mounted,
    /// User picked a file for processing.
    FileChosen(SelectedFile),
    /// Upload accepted; the service assigned `job_id`.
    SubmitSucceeded { generation: Generation, job_id: JobId },
    /// Upload rejected or failed in transit.
    SubmitFailed { generation: Generation, message: String },
    /// A progress query returned a well-formed snapshot.
    PollSucceeded {
        generation: Generation,
        job_id: JobId,
        snapshot: ProgressSnapshot,
    },
    /// A progress query failed (network, status, or body). Transient.
    PollFailed {
        generation: Generation,
        job_id: JobId,
        message: String,
    },
    HistoryLoaded { request: u64, records: Vec<HistoryRecord> },
    HistoryFailed { request: u64, message: String },
    /// User clicked a page-number control.
    PageSelected(usize),
    NextPage,
    PreviousPage,
    /// User clicked Export Results.
    ExportRequested,
    /// The consumer is going away; stop all job activity.
    Detached,
    /// UI/render tick to coalesce rendering.
    Tick,
}
