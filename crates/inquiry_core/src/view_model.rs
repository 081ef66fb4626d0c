use crate::paginate::PageWindow;
use crate::{Category, HistoryRecord, JobId, JobStatus, PollerState};

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub poller: PollerState,
    /// File name of an upload still waiting for its job id.
    pub submitting: Option<String>,
    pub job: Option<JobView>,
    pub validation_error: Option<String>,
    pub submit_error: Option<String>,
    pub results_count: usize,
    /// Rows of the current page only.
    pub rows: Vec<ResultRowView>,
    pub window: PageWindow,
    pub history: Vec<HistoryRowView>,
    pub history_loading: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub job_id: JobId,
    pub file_name: String,
    pub status: JobStatus,
    pub processed: u64,
    pub total: u64,
    pub progress_percent: u8,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    /// 1-based position in the full result list.
    pub position: usize,
    pub email: String,
    pub category: Category,
    /// Label exactly as the service sent it.
    pub category_label: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub label: String,
    pub detail: Option<String>,
    pub timestamp: Option<String>,
}

impl HistoryRowView {
    pub(crate) fn from_record(record: &HistoryRecord) -> Self {
        let detail = match (&record.category, record.total_inquiries) {
            (Some(category), _) => Some(category.clone()),
            (None, Some(total)) => Some(format!("{total} inquiries")),
            (None, None) => None,
        };
        Self {
            id: record.id.clone(),
            label: record.label().to_string(),
            detail,
            timestamp: record.timestamp().map(ToOwned::to_owned),
        }
    }
}
