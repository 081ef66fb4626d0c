use crate::{InquiryRecord, JobStatus};

/// Outcome of reconciling a results snapshot into the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merge {
    /// The incoming list replaces the current one wholesale.
    Replaced(Vec<InquiryRecord>),
    /// A shorter list arrived while the job was still processing; the
    /// current list stays.
    Rejected { current_len: usize, incoming_len: usize },
}

/// Reconciles the cumulative `incoming` list against `current`.
///
/// Each poll returns the full list accumulated so far, so a merge is a
/// replacement, never an append. While the job is processing the list may
/// only grow; a regression means the response is stale or out of order.
pub fn merge(current: &[InquiryRecord], incoming: Vec<InquiryRecord>, status: JobStatus) -> Merge {
    let still_processing = matches!(status, JobStatus::Pending | JobStatus::Processing);
    if still_processing && incoming.len() < current.len() {
        return Merge::Rejected {
            current_len: current.len(),
            incoming_len: incoming.len(),
        };
    }
    Merge::Replaced(incoming)
}
