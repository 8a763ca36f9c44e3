//! Error types for the lint pipeline.

use thiserror::Error;

/// Errors produced while linting a request.
#[derive(Debug, Error)]
pub enum LintError {
    /// A linter failed on the request.
    #[error("linter `{linter}` failed: {message}")]
    Linter {
        /// Name of the failing linter.
        linter: String,
        /// Failure description.
        message: String,
    },

    /// No linter is registered under the id.
    #[error("unknown linter `{id}`")]
    UnknownLinter {
        /// The requested linter id.
        id: String,
    },

    /// The request declares an encoding the encoding check cannot handle.
    #[error("unsupported encoding `{name}`")]
    UnsupportedEncoding {
        /// Declared encoding name.
        name: String,
    },

    /// The service no longer accepts requests.
    #[error("lint service is shutting down")]
    ShuttingDown,

    /// The worker thread could not be started.
    #[error("failed to spawn lint worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors reporting a finished request back to its document.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The owning document was destroyed while the request was in flight.
    #[error("document is gone")]
    DocumentGone,

    /// Any other dispatch failure.
    #[error("dispatch failed: {message}")]
    Failed {
        /// Failure description.
        message: String,
    },
}
