use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use inquiry_core::{Generation, JobId};
use inquiry_logging::{inquiry_debug, inquiry_info, inquiry_warn};
use tokio_util::sync::CancellationToken;

use crate::api::{ClientSettings, InquiryApi, ReqwestInquiryApi};
use crate::{ClientError, ClientEvent, Upload};

enum ClientCommand {
    Submit {
        generation: Generation,
        file_name: String,
        location: PathBuf,
    },
    Poll {
        generation: Generation,
        job_id: JobId,
        delay: Duration,
    },
    Cancel {
        generation: Generation,
    },
    LoadHistory {
        request: u64,
    },
}

/// Runs service calls on a background runtime and reports [`ClientEvent`]s.
///
/// Submit and poll work is tied to a generation. Cancelling a generation
/// aborts its pending timer and suppresses any response still in flight;
/// starting a newer submission cancels every older generation.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let api = ReqwestInquiryApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn InquiryApi>) -> Result<Self, ClientError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("inquiry-client")
            .enable_all()
            .build()
            .map_err(|err| ClientError::Runtime(err.to_string()))?;

        thread::spawn(move || {
            let mut tokens = GenerationTokens::default();
            while let Ok(command) = cmd_rx.recv() {
                dispatch(&runtime, &api, &mut tokens, command, &event_tx);
            }
            inquiry_debug!("Client command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit(&self, generation: Generation, file_name: impl Into<String>, location: PathBuf) {
        let _ = self.cmd_tx.send(ClientCommand::Submit {
            generation,
            file_name: file_name.into(),
            location,
        });
    }

    pub fn schedule_poll(&self, generation: Generation, job_id: impl Into<JobId>, delay: Duration) {
        let _ = self.cmd_tx.send(ClientCommand::Poll {
            generation,
            job_id: job_id.into(),
            delay,
        });
    }

    pub fn cancel(&self, generation: Generation) {
        let _ = self.cmd_tx.send(ClientCommand::Cancel { generation });
    }

    pub fn load_history(&self, request: u64) {
        let _ = self.cmd_tx.send(ClientCommand::LoadHistory { request });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means the
    /// client thread is gone and no further events will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<ClientEvent, mpsc::RecvTimeoutError> {
        let receiver = self
            .event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?;
        receiver.recv_timeout(timeout)
    }
}

/// One cancellation token per live generation. Once a generation is
/// retired it can never be revived by a late command.
#[derive(Default)]
struct GenerationTokens {
    live: BTreeMap<Generation, CancellationToken>,
    retired_through: Option<Generation>,
}

impl GenerationTokens {
    fn is_retired(&self, generation: Generation) -> bool {
        self.retired_through
            .is_some_and(|retired| generation <= retired)
    }

    fn retire(&mut self, generation: Generation) {
        self.retired_through = Some(self.retired_through.map_or(generation, |r| r.max(generation)));
    }

    fn token_for(&mut self, generation: Generation) -> Option<CancellationToken> {
        if self.is_retired(generation) {
            return None;
        }
        Some(self.live.entry(generation).or_default().clone())
    }

    /// Cancels every generation older than `generation`.
    fn retire_before(&mut self, generation: Generation) {
        let current = self.live.split_off(&generation);
        for (stale, token) in std::mem::replace(&mut self.live, current) {
            inquiry_debug!("Cancelling superseded generation {}", stale);
            token.cancel();
        }
        if let Some(previous) = generation.checked_sub(1) {
            self.retire(previous);
        }
    }

    fn cancel(&mut self, generation: Generation) -> bool {
        self.retire(generation);
        match self.live.remove(&generation) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

fn dispatch(
    runtime: &tokio::runtime::Runtime,
    api: &Arc<dyn InquiryApi>,
    tokens: &mut GenerationTokens,
    command: ClientCommand,
    event_tx: &mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Submit {
            generation,
            file_name,
            location,
        } => {
            tokens.retire_before(generation);
            let Some(token) = tokens.token_for(generation) else {
                inquiry_debug!("Dropping submission for retired generation {}", generation);
                return;
            };
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = tokio::select! {
                    () = token.cancelled() => return,
                    result = submit_file(api.as_ref(), file_name, location) => result,
                };
                if token.is_cancelled() {
                    return;
                }
                let _ = event_tx.send(ClientEvent::Submitted { generation, result });
            });
        }
        ClientCommand::Poll {
            generation,
            job_id,
            delay,
        } => {
            let Some(token) = tokens.token_for(generation) else {
                inquiry_debug!(
                    "Dropping poll for job {} of retired generation {}",
                    job_id,
                    generation
                );
                return;
            };
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                tokio::select! {
                    () = token.cancelled() => return,
                    () = tokio::time::sleep(delay) => {}
                }
                let result = tokio::select! {
                    () = token.cancelled() => return,
                    result = api.progress(&job_id) => result,
                };
                if token.is_cancelled() {
                    inquiry_debug!("Suppressing late progress for job {}", job_id);
                    return;
                }
                let _ = event_tx.send(ClientEvent::Polled {
                    generation,
                    job_id,
                    result,
                });
            });
        }
        ClientCommand::Cancel { generation } => {
            if tokens.cancel(generation) {
                inquiry_info!("Cancelled polling for generation {}", generation);
            }
        }
        ClientCommand::LoadHistory { request } => {
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = api.history().await;
                if let Err(err) = &result {
                    inquiry_warn!("History request {} failed: {}", request, err);
                }
                let _ = event_tx.send(ClientEvent::HistoryLoaded { request, result });
            });
        }
    }
}

async fn submit_file(
    api: &dyn InquiryApi,
    file_name: String,
    location: PathBuf,
) -> Result<crate::JobHandle, ClientError> {
    let bytes = tokio::fs::read(&location)
        .await
        .map_err(|err| ClientError::Io(format!("{}: {err}", location.display())))?;
    inquiry_info!("Uploading {} ({} bytes)", file_name, bytes.len());
    api.submit(Upload { file_name, bytes }).await
}
