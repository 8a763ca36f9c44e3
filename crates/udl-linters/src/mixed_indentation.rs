//! Linter for indentation that mixes tabs and spaces.

use crate::numbered_lines;
use udl_lint_core::{LintError, LintRequest, LintResult, LintResults, Linter, Severity};

/// Linter code for mixed-indentation.
pub const CODE: &str = "UL003";

/// Linter name for mixed-indentation.
pub const NAME: &str = "mixed-indentation";

/// Flags leading whitespace containing both tabs and spaces.
#[derive(Debug, Clone)]
pub struct MixedIndentation {
    /// Severity of reported findings.
    pub severity: Severity,
}

impl Default for MixedIndentation {
    fn default() -> Self {
        Self::new()
    }
}

impl MixedIndentation {
    /// Creates the linter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Linter for MixedIndentation {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn description(&self) -> &str {
        "Forbids mixing tabs and spaces in indentation"
    }

    fn lint_with_text(&self, _: &LintRequest, text: &str) -> Result<LintResults, LintError> {
        let mut results = LintResults::new();
        for (line, body) in numbered_lines(text) {
            let indent: &str = &body[..body.len() - body.trim_start_matches([' ', '\t']).len()];
            if indent.contains(' ') && indent.contains('\t') {
                results.add(
                    LintResult::new(
                        self.severity,
                        line,
                        1,
                        indent.len() + 1,
                        "Indentation mixes tabs and spaces",
                    )
                    .with_source(NAME),
                );
            }
        }
        Ok(results)
    }
}
