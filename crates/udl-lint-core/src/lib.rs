//! # udl-lint-core
//!
//! Asynchronous linting for editor documents.
//!
//! The document owner snapshots a buffer into a [`LintRequest`] and hands
//! it to a [`LintService`]. One background [`LintWorker`] drains the
//! [`LintRequestQueue`], and for each request:
//!
//! 1. checks that the content fits its declared encoding, turning every
//!    unencodable run into an error (the linter is skipped if any exist)
//! 2. runs the resolved [`Linter`], unless the language opted out and the
//!    request is not forced
//! 3. reports runs of lines with an unexpected terminator
//!
//! Finished requests go back through a [`ResultDispatcher`]. Several
//! linters for one language are combined by [`GenericLinterAggregator`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use udl_lint_core::{ChannelDispatcher, LintRequest, LintService, MapPreferences};
//!
//! let (dispatcher, done) = ChannelDispatcher::new();
//! let service = LintService::builder(dispatcher)
//!     .preferences(Arc::new(MapPreferences::new()))
//!     .start()
//!     .unwrap();
//!
//! service
//!     .add_request(LintRequest::new("doc", "Text", "caf\u{e9}\n").with_encoding("ascii"))
//!     .unwrap();
//! let finished = done.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert!(finished.results.has_errors());
//! service.shutdown();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregator;
mod config;
mod dispatch;
mod error;
mod linter;
mod queue;
mod registry;
mod request;
mod service;
mod types;
mod worker;

/// Content checks run by the worker.
pub mod checks;

pub use aggregator::GenericLinterAggregator;
pub use checks::encoding::{encoding_results, Encoding};
pub use checks::eol::{mixed_eol_results, EolMode};
pub use config::{
    keys, Config, ConfigError, LanguageConfig, LintSettings, LinterConfig, MapPreferences,
    PrefValue, Preferences,
};
pub use dispatch::{ChannelDispatcher, ResultDispatcher};
pub use error::{DispatchError, LintError};
pub use linter::{Linter, LinterRef};
pub use queue::{LintRequestQueue, QueueItem};
pub use registry::{linter_for_language, InMemoryLinterRegistry, LinterRegistry};
pub use request::LintRequest;
pub use service::{LintService, LintServiceBuilder};
pub use types::{LintDiagnostic, LintResult, LintResults, Severity};
pub use worker::{LintWorker, WorkerState};
