use std::time::Duration;

use inquiry_core::{HistoryRecord, ProgressSnapshot};
use inquiry_logging::inquiry_debug;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ClientError, JobHandle, Upload, DEFAULT_INVALID_INPUT};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        })
    }
}

/// The three calls the remote inquiry service exposes.
#[async_trait::async_trait]
pub trait InquiryApi: Send + Sync {
    /// `POST /api/inquiries/process/batch`. Exactly one request, no retry.
    async fn submit(&self, upload: Upload) -> Result<JobHandle, ClientError>;

    /// `GET /progress/{jobId}`.
    async fn progress(&self, job_id: &str) -> Result<ProgressSnapshot, ClientError>;

    /// `GET /api/inquiries/history`, newest first as the service orders it.
    async fn history(&self) -> Result<Vec<HistoryRecord>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInquiryApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ReqwestInquiryApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        if settings.base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(settings.base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.settings.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        inquiry_debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed(status.as_u16()));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| ClientError::ProtocolViolation(err.to_string()))
    }
}

#[async_trait::async_trait]
impl InquiryApi for ReqwestInquiryApi {
    async fn submit(&self, upload: Upload) -> Result<JobHandle, ClientError> {
        let url = self.endpoint(&["api", "inquiries", "process", "batch"])?;
        let mime = upload.mime_type();
        let size = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name.clone())
            .mime_str(mime)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        inquiry_debug!("POST {} file={} bytes={}", url, upload.file_name, size);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await.map_err(map_reqwest_error)?;
            let handle: JobHandle = serde_json::from_slice(&body)
                .map_err(|err| ClientError::ProtocolViolation(err.to_string()))?;
            if handle.job_id.trim().is_empty() {
                return Err(ClientError::ProtocolViolation("empty jobId".to_string()));
            }
            return Ok(handle);
        }

        match status {
            StatusCode::BAD_REQUEST => {
                let message = response
                    .bytes()
                    .await
                    .ok()
                    .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                    .and_then(|body| body.message)
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_INVALID_INPUT.to_string());
                Err(ClientError::InvalidInput(message))
            }
            StatusCode::INTERNAL_SERVER_ERROR => Err(ClientError::ServerUnavailable),
            other => Err(ClientError::RequestFailed(other.as_u16())),
        }
    }

    async fn progress(&self, job_id: &str) -> Result<ProgressSnapshot, ClientError> {
        let url = self.endpoint(&["progress", job_id])?;
        self.get_json(url).await
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>, ClientError> {
        let url = self.endpoint(&["api", "inquiries", "history"])?;
        self.get_json(url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }
    ClientError::Network(err.to_string())
}
