//! Inquiry client: service calls, poll scheduling, and export IO.
mod api;
mod export;
mod handle;
mod types;

pub use api::{ClientSettings, InquiryApi, ReqwestInquiryApi};
pub use export::{ExportError, ExportWriter};
pub use handle::ClientHandle;
pub use types::{ClientError, ClientEvent, JobHandle, Upload, DEFAULT_INVALID_INPUT};
