//! The background lint worker.

use crate::checks::encoding::{encoding_results, Encoding};
use crate::checks::eol::{mixed_eol_results, EolMode};
use crate::config::{keys, Preferences};
use crate::dispatch::ResultDispatcher;
use crate::error::{DispatchError, LintError};
use crate::linter::{guarded, panic_message};
use crate::queue::{LintRequestQueue, QueueItem};
use crate::request::LintRequest;
use crate::types::LintResults;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Where the worker is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Waiting for the next queue item.
    Idle,
    /// Running the checks and the linter.
    Processing,
    /// Handing the request back to its owner.
    Reporting,
    /// The loop has exited.
    Terminated,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Reporting => "reporting",
            Self::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Consumes the lint queue until it sees the shutdown sentinel.
pub struct LintWorker {
    queue: Arc<LintRequestQueue>,
    prefs: Arc<dyn Preferences>,
    dispatcher: Arc<dyn ResultDispatcher>,
    state: Arc<Mutex<WorkerState>>,
    cancel: CancellationToken,
    exited: Option<mpsc::Sender<()>>,
}

impl LintWorker {
    /// Creates a worker over `queue`.
    #[must_use]
    pub fn new(
        queue: Arc<LintRequestQueue>,
        prefs: Arc<dyn Preferences>,
        dispatcher: Arc<dyn ResultDispatcher>,
    ) -> Self {
        Self {
            queue,
            prefs,
            dispatcher,
            state: Arc::new(Mutex::new(WorkerState::Idle)),
            cancel: CancellationToken::new(),
            exited: None,
        }
    }

    /// Uses `token` to observe cancellation.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Signals on (or disconnects) `exited` when the loop ends.
    #[must_use]
    pub fn with_exit_signal(mut self, exited: mpsc::Sender<()>) -> Self {
        self.exited = Some(exited);
        self
    }

    /// Shared handle to the worker state.
    #[must_use]
    pub fn state_handle(&self) -> Arc<Mutex<WorkerState>> {
        Arc::clone(&self.state)
    }

    /// Runs the loop on the current thread.
    pub fn run(self) {
        info!("lint worker started");
        loop {
            self.set_state(WorkerState::Idle);
            let request = match self.queue.get() {
                QueueItem::Shutdown => {
                    debug!("shutdown sentinel received");
                    break;
                }
                QueueItem::Request(request) => request,
            };
            if self.cancel.is_cancelled() {
                debug!(uid = %request.uid, "cancellation observed; dropping request");
                break;
            }

            self.set_state(WorkerState::Processing);
            let request = self.process(request);

            self.set_state(WorkerState::Reporting);
            self.report(request);
        }
        self.set_state(WorkerState::Terminated);
        info!("lint worker stopped");
        if let Some(exited) = &self.exited {
            exited.send(()).ok();
        }
    }

    /// Runs the checks and the linter, recording the outcome on the request.
    ///
    /// Never fails: errors and panics end up in `request.error`.
    #[must_use]
    pub fn process(&self, mut request: LintRequest) -> LintRequest {
        debug!(uid = %request.uid, language = %request.language, "linting");
        match catch_unwind(AssertUnwindSafe(|| self.lint_request(&request))) {
            Ok(Ok(results)) => request.results = results,
            Ok(Err(e)) => {
                warn!(uid = %request.uid, error = %e, "lint request failed");
                request.error = Some(e.to_string());
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(uid = %request.uid, %message, "lint request panicked");
                request.error = Some(message);
            }
        }
        request
    }

    fn lint_request(&self, request: &LintRequest) -> Result<LintResults, LintError> {
        let encoding = Encoding::from_name(&request.encoding)?;
        let mut results = encoding_results(&request.content, encoding);

        if results.is_empty() && self.should_lint(request) {
            if let Some(linter) = &request.linter {
                match guarded(linter.name(), || linter.lint(request)) {
                    Ok(found) => results.merge_from(found),
                    Err(e) => {
                        warn!(
                            uid = %request.uid,
                            linter = linter.name(),
                            error = %e,
                            "linter failed"
                        );
                    }
                }
            }
        }

        if self.prefs.get_bool(keys::LINT_MIXED_EOLS).unwrap_or(true) {
            results.merge_from(mixed_eol_results(&request.content, self.expected_eol(request)));
        }
        Ok(results)
    }

    fn should_lint(&self, request: &LintRequest) -> bool {
        request.always_lint
            || self
                .prefs
                .get_bool(&keys::generic_linter(&request.language))
                .unwrap_or(true)
    }

    fn expected_eol(&self, request: &LintRequest) -> EolMode {
        request
            .eol
            .or_else(|| {
                self.prefs
                    .get_string(keys::END_OF_LINE)
                    .and_then(|s| EolMode::parse(&s))
            })
            .unwrap_or_default()
    }

    fn report(&self, request: LintRequest) {
        let uid = request.uid.clone();
        match self.dispatcher.dispatch(request) {
            Ok(()) => debug!(%uid, "results reported"),
            Err(DispatchError::DocumentGone) => {
                debug!(%uid, "document gone before results arrived");
            }
            Err(e) => error!(%uid, error = %e, "unexpected dispatch failure"),
        }
    }

    fn set_state(&self, state: WorkerState) {
        *self.state.lock() = state;
    }
}
