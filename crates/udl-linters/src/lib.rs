//! # udl-linters
//!
//! Built-in terminal linters for udl.
//!
//! These linters are language-agnostic text checks. Register them for any
//! language through configuration; a language with several linters is
//! linted by the aggregator in `udl-lint-core`.
//!
//! ## Available Linters
//!
//! | Code | Name | Default severity | Description |
//! |------|------|------------------|-------------|
//! | UL001 | `trailing-whitespace` | warning | Whitespace at the end of a line |
//! | UL002 | `line-length` | warning | Lines longer than `max_length` (120) |
//! | UL003 | `mixed-indentation` | warning | Tabs and spaces mixed in indentation |
//! | UL004 | `unbalanced-brackets` | error | Unmatched `()`, `[]` or `{}` |
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use udl_lint_core::{linter_for_language, Config, LintRequest, LinterRegistry};
//! use udl_linters::{build_registry, DEFAULT_LANGUAGE};
//!
//! let registry: Arc<dyn LinterRegistry> = Arc::new(build_registry(&Config::default()));
//! let linter = linter_for_language(&registry, DEFAULT_LANGUAGE).unwrap();
//! let results = linter.lint(&LintRequest::new("doc", DEFAULT_LANGUAGE, "f(x \n")).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod line_length;
mod mixed_indentation;
mod presets;
mod registry;
mod trailing_whitespace;
mod unbalanced_brackets;

pub use line_length::LineLength;
pub use mixed_indentation::MixedIndentation;
pub use presets::{all_linters, minimal_linters, recommended_linters, strict_linters, Preset};
pub use registry::{
    build_registry, configured_preset, linter_by_id, DEFAULT_LANGUAGE, LINTER_IDS,
};
pub use trailing_whitespace::TrailingWhitespace;
pub use unbalanced_brackets::UnbalancedBrackets;

use udl_lint_core::checks::split_lines;

/// Re-export core types for convenience.
pub use udl_lint_core::{Linter, Severity};

/// Lines of `text` with 1-based numbers, terminators removed.
///
/// Uses the same split as the worker's content checks, so a lone `\r`
/// ends a line.
pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    split_lines(text)
        .into_iter()
        .enumerate()
        .map(|(i, (body, _))| (i + 1, body))
}
