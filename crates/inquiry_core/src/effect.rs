use std::time::Duration;

use crate::{Generation, JobId, SelectedFile};

/// Side effects requested by [`crate::update`]; executed by the IO layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the file and report back with the same generation.
    Submit {
        generation: Generation,
        file: SelectedFile,
    },
    /// Query job progress once, after `delay`.
    SchedulePoll {
        generation: Generation,
        job_id: JobId,
        delay: Duration,
    },
    /// Drop the pending timer and any in-flight request of `generation`.
    CancelPolling { generation: Generation },
    LoadHistory { request: u64 },
    /// Write the rendered CSV to the export location.
    ExportCsv { contents: String, row_count: usize },
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-facing notice (toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}
