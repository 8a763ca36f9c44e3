//! The linter trait.

use crate::error::LintError;
use crate::request::LintRequest;
use crate::types::LintResults;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A linter for one or more languages.
///
/// Terminal linters check a single language directly. Implementations
/// override [`Linter::lint_with_text`]; [`Linter::lint`] feeds it the
/// request's content snapshot.
///
/// # Example
///
/// ```
/// use udl_lint_core::{LintError, LintRequest, LintResult, LintResults, Linter, Severity};
///
/// struct NoTabs;
///
/// impl Linter for NoTabs {
///     fn name(&self) -> &str { "no-tabs" }
///
///     fn lint_with_text(&self, _req: &LintRequest, text: &str) -> Result<LintResults, LintError> {
///         Ok(text
///             .lines()
///             .enumerate()
///             .filter(|(_, l)| l.contains('\t'))
///             .map(|(i, _)| LintResult::new(Severity::Warning, i + 1, 1, 2, "tab"))
///             .collect())
///     }
/// }
///
/// let req = LintRequest::new("doc", "Text", "a\n\tb\n");
/// assert_eq!(NoTabs.lint(&req).unwrap().len(), 1);
/// ```
pub trait Linter: Send + Sync {
    /// Returns the kebab-case name of this linter.
    fn name(&self) -> &str;

    /// Returns the linter code (e.g., "UL001").
    fn code(&self) -> &str {
        ""
    }

    /// Returns a brief description of what this linter checks.
    fn description(&self) -> &str {
        ""
    }

    /// Lints the request's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the linter cannot process the request.
    fn lint(&self, request: &LintRequest) -> Result<LintResults, LintError> {
        self.lint_with_text(request, &request.content)
    }

    /// Lints `text` on behalf of `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the linter cannot process the text.
    fn lint_with_text(&self, request: &LintRequest, text: &str)
        -> Result<LintResults, LintError>;
}

/// Shared linter trait object.
pub type LinterRef = Arc<dyn Linter>;

/// Runs `f`, turning a panic inside the linter into [`LintError::Linter`].
pub(crate) fn guarded<F>(linter: &str, f: F) -> Result<LintResults, LintError>
where
    F: FnOnce() -> Result<LintResults, LintError>,
{
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(LintError::Linter {
            linter: linter.to_string(),
            message: panic_message(payload.as_ref()),
        })
    })
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
