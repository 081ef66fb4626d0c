use std::time::Duration;

use inquiry_logging::{inquiry_debug, inquiry_info, inquiry_warn};

use crate::paginate::{clamp_page, paginate, total_pages, PAGE_SIZE};
use crate::reconcile::{merge, Merge};
use crate::view_model::{AppViewModel, HistoryRowView, JobView, ResultRowView};
use crate::{
    Category, Generation, HistoryRecord, InquiryRecord, Job, JobId, JobStatus,
    ProgressSnapshot, RemoteStatus, ValidationError,
};

/// Default spacing between progress queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

const FALLBACK_JOB_ERROR: &str = "Processing failed";

/// Progress poller state for the active job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Polling,
    Completed,
    Failed,
}

impl PollerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PollerState::Completed | PollerState::Failed)
    }
}

/// An upload that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub generation: Generation,
    pub file_name: String,
}

/// What a progress snapshot did to the active job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollOutcome {
    /// Not for the active job; ignored.
    Stale,
    /// Still processing; poll again.
    Continue,
    Completed { result_count: usize, file_name: String },
    Failed { message: String },
}

/// Single-writer view state. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    generation: Generation,
    poller: PollerState,
    pending: Option<PendingSubmission>,
    job: Option<Job>,
    current_page: usize,
    validation_error: Option<ValidationError>,
    submit_error: Option<String>,
    history: Vec<HistoryRecord>,
    history_request: u64,
    history_loading: bool,
    poll_interval: Duration,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            generation: 0,
            poller: PollerState::Idle,
            pending: None,
            job: None,
            current_page: 1,
            validation_error: None,
            submit_error: None,
            history: Vec::new(),
            history_request: 0,
            history_loading: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn poller(&self) -> PollerState {
        self.poller
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn pending_submission(&self) -> Option<&PendingSubmission> {
        self.pending.as_ref()
    }

    pub fn results(&self) -> &[InquiryRecord] {
        self.job.as_ref().map_or(&[], |job| job.results.as_slice())
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn is_history_loading(&self) -> bool {
        self.history_loading
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// True while an upload or a poll loop is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || self.poller == PollerState::Polling
    }

    pub fn view(&self) -> AppViewModel {
        let results = self.results();
        let page = paginate(results, PAGE_SIZE, self.current_page);
        let offset = (page.window.current_page - 1) * PAGE_SIZE;
        let rows = page
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| ResultRowView {
                position: offset + i + 1,
                email: record.email.clone(),
                category: Category::from_label(&record.category),
                category_label: record.category.clone(),
                response: record.response.clone(),
            })
            .collect();

        AppViewModel {
            poller: self.poller,
            submitting: self.pending.as_ref().map(|p| p.file_name.clone()),
            job: self.job.as_ref().map(|job| JobView {
                job_id: job.job_id.clone(),
                file_name: job.file_name.clone(),
                status: job.status,
                processed: job.processed,
                total: job.total,
                progress_percent: job.progress_percent(),
                error_message: job.error_message.clone(),
            }),
            validation_error: self.validation_error.as_ref().map(ToString::to_string),
            submit_error: self.submit_error.clone(),
            results_count: results.len(),
            rows,
            window: page.window,
            history: self.history.iter().map(HistoryRowView::from_record).collect(),
            history_loading: self.history_loading,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn reject_file(&mut self, error: ValidationError) {
        self.validation_error = Some(error);
        self.mark_dirty();
    }

    /// Starts a new generation and discards the previous job view.
    ///
    /// Returns the superseded generation when it still had work outstanding.
    pub(crate) fn begin_submission(&mut self, file_name: &str) -> (Option<Generation>, Generation) {
        let superseded = self.is_busy().then_some(self.generation);
        self.generation += 1;
        self.poller = PollerState::Idle;
        self.job = None;
        self.pending = Some(PendingSubmission {
            generation: self.generation,
            file_name: file_name.to_string(),
        });
        self.current_page = 1;
        self.validation_error = None;
        self.submit_error = None;
        self.mark_dirty();
        inquiry_info!(
            "Submitting {} as generation {}",
            file_name,
            self.generation
        );
        (superseded, self.generation)
    }

    fn take_pending(&mut self, generation: Generation) -> Option<PendingSubmission> {
        match &self.pending {
            Some(pending) if pending.generation == generation => self.pending.take(),
            _ => None,
        }
    }

    pub(crate) fn accept_job(&mut self, generation: Generation, job_id: &JobId) -> bool {
        let Some(pending) = self.take_pending(generation) else {
            inquiry_debug!(
                "Ignoring submission result for stale generation {} (current {})",
                generation,
                self.generation
            );
            return false;
        };
        inquiry_info!("Job {} accepted for {}", job_id, pending.file_name);
        self.job = Some(Job::accepted(job_id.clone(), pending.file_name));
        self.poller = PollerState::Polling;
        self.mark_dirty();
        true
    }

    pub(crate) fn fail_submission(&mut self, generation: Generation, message: &str) -> bool {
        if self.take_pending(generation).is_none() {
            inquiry_debug!(
                "Ignoring submission failure for stale generation {}",
                generation
            );
            return false;
        }
        inquiry_warn!("Submission failed: {}", message);
        self.submit_error = Some(message.to_string());
        self.poller = PollerState::Idle;
        self.mark_dirty();
        true
    }

    /// True when a poll response belongs to the job currently being polled.
    pub(crate) fn is_current_poll(&self, generation: Generation, job_id: &str) -> bool {
        generation == self.generation
            && self.poller == PollerState::Polling
            && self.job.as_ref().is_some_and(|job| job.job_id == job_id)
    }

    pub(crate) fn apply_snapshot(
        &mut self,
        generation: Generation,
        job_id: &str,
        snapshot: ProgressSnapshot,
    ) -> PollOutcome {
        if !self.is_current_poll(generation, job_id) {
            inquiry_debug!(
                "Discarding progress for job {} generation {} (current generation {})",
                job_id,
                generation,
                self.generation
            );
            return PollOutcome::Stale;
        }
        let Some(job) = self.job.as_mut() else {
            return PollOutcome::Stale;
        };

        let outcome = match snapshot.status {
            RemoteStatus::Processing => {
                match merge(&job.results, snapshot.results, job.status) {
                    Merge::Replaced(results) => {
                        job.results = results;
                        job.status = JobStatus::Processing;
                        job.set_counts(snapshot.processed, snapshot.total);
                    }
                    Merge::Rejected {
                        current_len,
                        incoming_len,
                    } => {
                        inquiry_warn!(
                            "Job {}: dropping out-of-order snapshot ({} results, showing {})",
                            job.job_id,
                            incoming_len,
                            current_len
                        );
                        return PollOutcome::Continue;
                    }
                }
                PollOutcome::Continue
            }
            RemoteStatus::Completed => {
                if let Merge::Replaced(results) =
                    merge(&job.results, snapshot.results, JobStatus::Completed)
                {
                    job.results = results;
                }
                job.status = JobStatus::Completed;
                job.set_counts(snapshot.total, snapshot.total);
                self.poller = PollerState::Completed;
                inquiry_info!(
                    "Job {} completed with {} results",
                    job.job_id,
                    job.results.len()
                );
                PollOutcome::Completed {
                    result_count: job.results.len(),
                    file_name: job.file_name.clone(),
                }
            }
            RemoteStatus::Error => {
                let message = snapshot
                    .error
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_JOB_ERROR.to_string());
                job.status = JobStatus::Failed;
                job.error_message = Some(message.clone());
                self.poller = PollerState::Failed;
                inquiry_warn!("Job {} failed: {}", job.job_id, message);
                PollOutcome::Failed { message }
            }
        };

        self.clamp_current_page();
        self.mark_dirty();
        outcome
    }

    /// Tears down the active job. Returns the generation whose polling must
    /// be cancelled, if any work was outstanding.
    pub(crate) fn detach(&mut self) -> Option<Generation> {
        let outstanding = self.is_busy().then_some(self.generation);
        self.generation += 1;
        self.poller = PollerState::Idle;
        self.pending = None;
        self.job = None;
        self.current_page = 1;
        self.mark_dirty();
        outstanding
    }

    pub(crate) fn begin_history_load(&mut self) -> u64 {
        self.history_request += 1;
        self.history_loading = true;
        self.mark_dirty();
        self.history_request
    }

    pub(crate) fn apply_history(&mut self, request: u64, records: Vec<HistoryRecord>) -> bool {
        if request != self.history_request {
            inquiry_debug!(
                "Discarding history response {} (latest {})",
                request,
                self.history_request
            );
            return false;
        }
        self.history = records;
        self.history_loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn history_failed(&mut self, request: u64, message: &str) {
        inquiry_warn!("History unavailable: {}", message);
        if request == self.history_request && self.history_loading {
            self.history_loading = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn total_pages(&self) -> usize {
        total_pages(self.results().len(), PAGE_SIZE)
    }

    /// Moves to `page` when it exists and differs from the current page.
    pub(crate) fn select_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        self.mark_dirty();
        true
    }

    fn clamp_current_page(&mut self) {
        self.current_page = clamp_page(self.current_page, self.total_pages());
    }
}
