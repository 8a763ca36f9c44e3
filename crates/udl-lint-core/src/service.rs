//! Producer-side entry point: owns the queue and the worker thread.

use crate::config::{MapPreferences, Preferences};
use crate::dispatch::ResultDispatcher;
use crate::error::LintError;
use crate::queue::{LintRequestQueue, QueueItem};
use crate::registry::{linter_for_language, LinterRegistry};
use crate::request::LintRequest;
use crate::worker::{LintWorker, WorkerState};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Builder for a [`LintService`].
pub struct LintServiceBuilder {
    dispatcher: Arc<dyn ResultDispatcher>,
    prefs: Arc<dyn Preferences>,
    registry: Option<Arc<dyn LinterRegistry>>,
    thread_name: String,
}

impl LintServiceBuilder {
    /// Sets the preference store the worker consults.
    #[must_use]
    pub fn preferences(mut self, prefs: Arc<dyn Preferences>) -> Self {
        self.prefs = prefs;
        self
    }

    /// Sets the registry used to resolve linters for requests without one.
    #[must_use]
    pub fn registry(mut self, registry: Arc<dyn LinterRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Names the worker thread.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Spawns the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Spawn`] if the thread cannot be created.
    pub fn start(self) -> Result<LintService, LintError> {
        let queue = Arc::new(LintRequestQueue::new());
        let cancel = CancellationToken::new();
        let (exit_tx, exit_rx) = mpsc::channel();

        let worker = LintWorker::new(Arc::clone(&queue), self.prefs, self.dispatcher)
            .with_cancellation(cancel.clone())
            .with_exit_signal(exit_tx);
        let state = worker.state_handle();

        thread::Builder::new()
            .name(self.thread_name)
            .spawn(move || worker.run())?;

        Ok(LintService {
            queue,
            registry: self.registry,
            shutting_down: AtomicBool::new(false),
            cancel,
            state,
            exited: Mutex::new(exit_rx),
        })
    }
}

/// Accepts lint requests and feeds them to one background worker.
///
/// Linting is serialized: the worker runs one request at a time. Dropping
/// the service shuts it down without waiting.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use udl_lint_core::{ChannelDispatcher, LintRequest, LintService};
///
/// let (dispatcher, done) = ChannelDispatcher::new();
/// let service = LintService::builder(dispatcher).start().unwrap();
/// service.add_request(LintRequest::new("doc-1", "Text", "a\r\nb\n")).unwrap();
///
/// let finished = done.recv_timeout(Duration::from_secs(5)).unwrap();
/// assert_eq!(finished.results.len(), 1);
/// assert!(service.shutdown_and_wait(Duration::from_secs(5)));
/// ```
pub struct LintService {
    queue: Arc<LintRequestQueue>,
    registry: Option<Arc<dyn LinterRegistry>>,
    shutting_down: AtomicBool,
    cancel: CancellationToken,
    state: Arc<Mutex<WorkerState>>,
    exited: Mutex<mpsc::Receiver<()>>,
}

impl LintService {
    /// Starts building a service that reports through `dispatcher`.
    #[must_use]
    pub fn builder(dispatcher: impl ResultDispatcher + 'static) -> LintServiceBuilder {
        LintServiceBuilder {
            dispatcher: Arc::new(dispatcher),
            prefs: Arc::new(MapPreferences::new()),
            registry: None,
            thread_name: "udl-lint-worker".to_string(),
        }
    }

    /// Queues a request.
    ///
    /// A request without a linter gets one from the registry, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::ShuttingDown`] after [`shutdown`](Self::shutdown).
    pub fn add_request(&self, mut request: LintRequest) -> Result<(), LintError> {
        if self.is_shutting_down() {
            return Err(LintError::ShuttingDown);
        }
        if request.linter.is_none() {
            if let Some(registry) = &self.registry {
                request.linter = linter_for_language(registry, &request.language);
            }
        }
        debug!(uid = %request.uid, language = %request.language, "queueing lint request");
        self.queue.put(QueueItem::Request(request));
        Ok(())
    }

    /// Drops queued requests with `uid`. A request already being linted
    /// still completes.
    pub fn cancel_pending_requests(&self, uid: &str) -> usize {
        let removed = self.queue.remove_uid(uid);
        if removed > 0 {
            debug!(uid, removed, "cancelled pending lint requests");
        }
        removed
    }

    /// Stops the worker after its current request, without waiting.
    ///
    /// Queued requests are discarded. Calling this more than once is a no-op.
    pub fn shutdown(&self) {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(pending = self.queue.len(), "shutting down lint worker");
        self.cancel.cancel();
        self.queue.prepend(QueueItem::Shutdown);
    }

    /// Shuts down, then waits up to `timeout` for the worker to exit.
    ///
    /// Returns true if it exited in time. A linter that is still running is
    /// not interrupted.
    pub fn shutdown_and_wait(&self, timeout: Duration) -> bool {
        self.shutdown();
        if self.state() == WorkerState::Terminated {
            return true;
        }
        match self.exited.lock().recv_timeout(timeout) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => true,
            Err(mpsc::RecvTimeoutError::Timeout) => false,
        }
    }

    /// True once shutdown has begun.
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Number of queued items.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Current worker state.
    #[must_use]
    pub fn state(&self) -> WorkerState {
        *self.state.lock()
    }
}

impl Drop for LintService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ChannelDispatcher;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn requests_after_shutdown_are_rejected() {
        let (dispatcher, _rx) = ChannelDispatcher::new();
        let service = LintService::builder(dispatcher).start().expect("spawn");
        service.shutdown();
        let err = service
            .add_request(LintRequest::new("u", "Text", ""))
            .unwrap_err();
        assert!(matches!(err, LintError::ShuttingDown));
    }

    #[test]
    fn shutdown_and_wait_observes_exit() {
        let (dispatcher, _rx) = ChannelDispatcher::new();
        let service = LintService::builder(dispatcher).start().expect("spawn");
        assert!(service.shutdown_and_wait(WAIT));
        assert_eq!(service.state(), WorkerState::Terminated);
        // Second call returns immediately.
        assert!(service.shutdown_and_wait(Duration::from_millis(1)));
    }

    #[test]
    fn finished_requests_come_back() {
        let (dispatcher, rx) = ChannelDispatcher::new();
        let service = LintService::builder(dispatcher).start().expect("spawn");
        service
            .add_request(LintRequest::new("doc", "Text", "x\n"))
            .expect("accepted");
        let done = rx.recv_timeout(WAIT).expect("reported");
        assert_eq!(done.uid, "doc");
        assert!(done.results.is_empty());
    }
}
