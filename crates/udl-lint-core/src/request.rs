//! Lint requests.

use crate::checks::eol::EolMode;
use crate::linter::LinterRef;
use crate::types::LintResults;
use std::path::PathBuf;

/// One lint invocation for a document snapshot.
///
/// The document owner builds the request and hands it to
/// [`LintService::add_request`](crate::LintService::add_request). From then
/// on only the worker touches it, filling in `results` or `error`, until
/// the request comes back through a [`ResultDispatcher`](crate::ResultDispatcher).
pub struct LintRequest {
    /// Correlation id; requests sharing a uid are cancelled together.
    pub uid: String,
    /// Language name used to pick the linter.
    pub language: String,
    /// Content snapshot taken on the document's thread.
    pub content: String,
    /// Declared encoding of the document.
    pub encoding: String,
    /// Expected line terminator. Falls back to the `endOfLine` preference.
    pub eol: Option<EolMode>,
    /// Working directory for linters that spawn tools.
    pub cwd: Option<PathBuf>,
    /// Path of the document, if it has one.
    pub path: Option<PathBuf>,
    /// Lint even when the language opted out of its generic linter.
    pub always_lint: bool,
    /// Resolved linter; `None` skips the linter step.
    pub linter: Option<LinterRef>,
    /// Findings, filled in by the worker.
    pub results: LintResults,
    /// Failure description, filled in by the worker.
    pub error: Option<String>,
}

impl LintRequest {
    /// Creates a request for `content` in `language`, declared as UTF-8.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            language: language.into(),
            content: content.into(),
            encoding: "utf-8".to_string(),
            eol: None,
            cwd: None,
            path: None,
            always_lint: false,
            linter: None,
            results: LintResults::new(),
            error: None,
        }
    }

    /// Sets the declared encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Sets the expected line terminator.
    #[must_use]
    pub fn with_eol(mut self, eol: EolMode) -> Self {
        self.eol = Some(eol);
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Sets the document path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the linter to run.
    #[must_use]
    pub fn with_linter(mut self, linter: LinterRef) -> Self {
        self.linter = Some(linter);
        self
    }

    /// Lints regardless of the language's opt-out preference.
    #[must_use]
    pub fn forced(mut self) -> Self {
        self.always_lint = true;
        self
    }

    /// True once the worker recorded a failure.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

impl std::fmt::Debug for LintRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintRequest")
            .field("uid", &self.uid)
            .field("language", &self.language)
            .field("content_len", &self.content.len())
            .field("encoding", &self.encoding)
            .field("eol", &self.eol)
            .field("path", &self.path)
            .field("always_lint", &self.always_lint)
            .field("linter", &self.linter.as_ref().map(|l| l.name().to_string()))
            .field("results", &self.results.len())
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
