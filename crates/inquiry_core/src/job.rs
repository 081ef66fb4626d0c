use serde::{Deserialize, Serialize};

use crate::InquiryRecord;

/// Submission counter. Bumped for every new submission and on detach; every
/// request and response is tagged with the generation that issued it.
pub type Generation = u64;

/// Identifier the service assigns to an accepted batch.
pub type JobId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Status strings reported by `GET /progress/{jobId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Processing,
    Completed,
    Error,
}

/// One progress response. `results` is the cumulative list so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(rename = "progress")]
    pub processed: u64,
    pub total: u64,
    pub status: RemoteStatus,
    #[serde(default)]
    pub results: Vec<InquiryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The active batch job as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_id: JobId,
    pub file_name: String,
    pub status: JobStatus,
    pub processed: u64,
    pub total: u64,
    pub results: Vec<InquiryRecord>,
    pub error_message: Option<String>,
}

impl Job {
    pub(crate) fn accepted(job_id: JobId, file_name: String) -> Self {
        Self {
            job_id,
            file_name,
            status: JobStatus::Pending,
            processed: 0,
            total: 0,
            results: Vec::new(),
            error_message: None,
        }
    }

    /// Integer percentage; 0 while the total is unknown.
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let percent = self.processed.min(self.total) * 100 / self.total;
        percent as u8
    }

    /// Counts are clamped so `processed <= total` holds for any input.
    pub(crate) fn set_counts(&mut self, processed: u64, total: u64) {
        self.total = total;
        self.processed = processed.min(total);
    }
}
