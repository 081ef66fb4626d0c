use inquiry_core::{Generation, HistoryRecord, JobId, ProgressSnapshot};
use serde::Deserialize;
use thiserror::Error;

/// Message used when a 400 response carries no usable `message`.
pub const DEFAULT_INVALID_INPUT: &str = "Invalid file format or missing headers";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 400 from the batch endpoint.
    #[error("{0}")]
    InvalidInput(String),
    /// 500 from the batch endpoint.
    #[error("Server error. Please try again later.")]
    ServerUnavailable,
    #[error("Request failed with status {0}")]
    RequestFailed(u16),
    /// A 2xx response whose body does not match the contract.
    #[error("unexpected response from service: {0}")]
    ProtocolViolation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("could not read upload: {0}")]
    Io(String),
    #[error("client runtime unavailable: {0}")]
    Runtime(String),
}

/// Returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHandle {
    pub job_id: JobId,
}

/// A file ready to be sent as the single multipart part `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn mime_type(&self) -> &'static str {
        let lower = self.file_name.to_ascii_lowercase();
        if lower.ends_with(".json") {
            "application/json"
        } else if lower.ends_with(".csv") {
            "text/csv"
        } else {
            "application/octet-stream"
        }
    }
}

/// Outcomes reported back by [`crate::ClientHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Submitted {
        generation: Generation,
        result: Result<JobHandle, ClientError>,
    },
    Polled {
        generation: Generation,
        job_id: JobId,
        result: Result<ProgressSnapshot, ClientError>,
    },
    HistoryLoaded {
        request: u64,
        result: Result<Vec<HistoryRecord>, ClientError>,
    },
}
