//! Inquiry core: pure batch-job state machine and view-model helpers.
mod category;
mod effect;
pub mod export;
mod job;
mod msg;
pub mod paginate;
mod reconcile;
mod record;
mod state;
mod update;
mod validate;
mod view_model;

pub use category::{BadgeColor, Category};
pub use effect::{Effect, NoticeLevel, Notification};
pub use export::{export_filename, results_to_csv};
pub use job::{Generation, Job, JobId, JobStatus, ProgressSnapshot, RemoteStatus};
pub use msg::Msg;
pub use paginate::{paginate, Page, PageWindow, PAGE_SIZE};
pub use reconcile::{merge, Merge};
pub use record::{HistoryRecord, InquiryRecord};
pub use state::{AppState, PendingSubmission, PollerState, DEFAULT_POLL_INTERVAL};
pub use update::update;
pub use validate::{validate, SelectedFile, ValidationError, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
pub use view_model::{AppViewModel, HistoryRowView, JobView, ResultRowView};
