use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use inquiry_client::{ClientError, ClientEvent, ClientHandle, InquiryApi, JobHandle, Upload};
use inquiry_core::{HistoryRecord, ProgressSnapshot, RemoteStatus};
use tempfile::NamedTempFile;

/// Scripted service: fixed job id, a per-call progress delay, and a log of
/// uploaded file names.
struct FakeApi {
    progress_delay: Duration,
    progress_calls: AtomicUsize,
    uploads: Mutex<Vec<String>>,
}

impl FakeApi {
    fn new(progress_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            progress_delay,
            progress_calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl InquiryApi for FakeApi {
    async fn submit(&self, upload: Upload) -> Result<JobHandle, ClientError> {
        self.uploads.lock().unwrap().push(upload.file_name.clone());
        Ok(JobHandle {
            job_id: format!("job-{}", upload.file_name),
        })
    }

    async fn progress(&self, _job_id: &str) -> Result<ProgressSnapshot, ClientError> {
        self.progress_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.progress_delay).await;
        Ok(ProgressSnapshot {
            processed: 1,
            total: 2,
            status: RemoteStatus::Processing,
            results: Vec::new(),
            error: None,
        })
    }

    async fn history(&self) -> Result<Vec<HistoryRecord>, ClientError> {
        Err(ClientError::RequestFailed(503))
    }
}

fn upload_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"email,message\n").unwrap();
    file
}

const WAIT: Duration = Duration::from_secs(2);

#[test]
fn submit_reads_file_and_reports_job_handle() {
    let api = FakeApi::new(Duration::ZERO);
    let handle = ClientHandle::with_api(api.clone()).unwrap();
    let file = upload_file();

    handle.submit(1, "batch.csv", file.path().to_path_buf());

    match handle.recv_timeout(WAIT) {
        Ok(ClientEvent::Submitted { generation, result }) => {
            assert_eq!(generation, 1);
            assert_eq!(result.unwrap().job_id, "job-batch.csv");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*api.uploads.lock().unwrap(), vec!["batch.csv".to_string()]);
}

#[test]
fn missing_upload_file_is_an_io_error() {
    let api = FakeApi::new(Duration::ZERO);
    let handle = ClientHandle::with_api(api.clone()).unwrap();

    handle.submit(1, "gone.csv", "/definitely/not/here/gone.csv".into());

    match handle.recv_timeout(WAIT) {
        Ok(ClientEvent::Submitted { result, .. }) => {
            assert!(matches!(result, Err(ClientError::Io(_))));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(api.uploads.lock().unwrap().is_empty());
}

#[test]
fn scheduled_poll_fires_after_delay() {
    let api = FakeApi::new(Duration::ZERO);
    let handle = ClientHandle::with_api(api.clone()).unwrap();

    handle.schedule_poll(1, "job-1", Duration::from_millis(30));

    match handle.recv_timeout(WAIT) {
        Ok(ClientEvent::Polled {
            generation,
            job_id,
            result,
        }) => {
            assert_eq!(generation, 1);
            assert_eq!(job_id, "job-1");
            assert_eq!(result.unwrap().processed, 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(api.progress_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_before_timer_fires_suppresses_request() {
    let api = FakeApi::new(Duration::ZERO);
    let handle = ClientHandle::with_api(api.clone()).unwrap();

    handle.schedule_poll(1, "job-1", Duration::from_millis(200));
    handle.cancel(1);

    assert_eq!(
        handle.recv_timeout(Duration::from_millis(500)),
        Err(RecvTimeoutError::Timeout)
    );
    assert_eq!(api.progress_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn cancel_during_in_flight_request_drops_response() {
    let api = FakeApi::new(Duration::from_millis(300));
    let handle = ClientHandle::with_api(api.clone()).unwrap();

    handle.schedule_poll(1, "job-1", Duration::ZERO);
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(api.progress_calls.load(Ordering::SeqCst), 1);
    handle.cancel(1);

    assert_eq!(
        handle.recv_timeout(Duration::from_millis(600)),
        Err(RecvTimeoutError::Timeout)
    );
}

#[test]
fn new_submission_supersedes_older_generation() {
    let api = FakeApi::new(Duration::from_millis(300));
    let handle = ClientHandle::with_api(api.clone()).unwrap();
    let file = upload_file();

    handle.schedule_poll(1, "job-a", Duration::ZERO);
    std::thread::sleep(Duration::from_millis(100));
    handle.submit(2, "second.csv", file.path().to_path_buf());
    // A late command for the retired generation is refused as well.
    handle.schedule_poll(1, "job-a", Duration::ZERO);

    match handle.recv_timeout(WAIT) {
        Ok(ClientEvent::Submitted { generation, .. }) => assert_eq!(generation, 2),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        handle.recv_timeout(Duration::from_millis(600)),
        Err(RecvTimeoutError::Timeout)
    );
    assert_eq!(api.progress_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn history_failures_are_reported_with_request_number() {
    let api = FakeApi::new(Duration::ZERO);
    let handle = ClientHandle::with_api(api).unwrap();

    handle.load_history(3);

    match handle.recv_timeout(WAIT) {
        Ok(ClientEvent::HistoryLoaded { request, result }) => {
            assert_eq!(request, 3);
            assert_eq!(result, Err(ClientError::RequestFailed(503)));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
