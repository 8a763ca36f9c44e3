//! # udl
//!
//! Editor support for documents that mix several languages.
//!
//! This is the facade crate. It re-exports the lint pipeline at the top
//! level, the style-family machinery under [`lang`] and the built-in
//! linters under [`linters`].
//!
//! ## Style families
//!
//! ```
//! use udl::lang::{classify, styles, Family};
//!
//! assert_eq!(classify(styles::CSL_OPERATOR).unwrap(), Family::Csl);
//! ```
//!
//! ## Linting a project
//!
//! ```
//! use std::path::Path;
//! use std::time::Duration;
//! use udl::{Config, LintSession};
//!
//! let mut session = LintSession::start(Config::default()).unwrap();
//! let request = session.request_for(Path::new("notes.txt"), "(a \n".to_string());
//! session.submit(request).unwrap();
//!
//! let done = session.collect(Duration::from_secs(5));
//! assert_eq!(done[0].results.len(), 2);
//! session.finish(Duration::from_secs(5));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export the lint pipeline
pub use udl_lint_core::*;

/// Style families, boundary resolution and language delegation.
pub mod lang {
    pub use udl_lang::*;
}

/// Built-in linters and presets.
pub mod linters {
    pub use udl_linters::*;
}

mod session;

pub use session::{find_project_config, load_project_config, LintSession, CONFIG_CANDIDATES};
