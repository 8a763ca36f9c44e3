//! Linter for whitespace at the end of a line.

use crate::numbered_lines;
use udl_lint_core::{LintError, LintRequest, LintResult, LintResults, Linter, Severity};

/// Linter code for trailing-whitespace.
pub const CODE: &str = "UL001";

/// Linter name for trailing-whitespace.
pub const NAME: &str = "trailing-whitespace";

/// Flags spaces and tabs before a line terminator.
#[derive(Debug, Clone)]
pub struct TrailingWhitespace {
    /// Severity of reported findings.
    pub severity: Severity,
    /// Also flag lines that contain only whitespace.
    pub include_blank_lines: bool,
}

impl Default for TrailingWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingWhitespace {
    /// Creates the linter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            include_blank_lines: true,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether whitespace-only lines are reported.
    #[must_use]
    pub fn include_blank_lines(mut self, include: bool) -> Self {
        self.include_blank_lines = include;
        self
    }
}

impl Linter for TrailingWhitespace {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn description(&self) -> &str {
        "Flags whitespace at the end of a line"
    }

    fn lint_with_text(&self, _: &LintRequest, text: &str) -> Result<LintResults, LintError> {
        let mut results = LintResults::new();
        for (line, body) in numbered_lines(text) {
            let trimmed = body.trim_end_matches([' ', '\t']);
            if trimmed.len() == body.len() {
                continue;
            }
            if trimmed.is_empty() && !self.include_blank_lines {
                continue;
            }
            let start = trimmed.chars().count() + 1;
            let end = body.chars().count() + 1;
            results.add(
                LintResult::new(self.severity, line, start, end, "Trailing whitespace")
                    .with_source(NAME),
            );
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, linter: &TrailingWhitespace) -> Vec<(usize, usize, usize)> {
        linter
            .lint(&LintRequest::new("t", "Text", text))
            .expect("never fails")
            .iter()
            .map(|r| (r.line_start, r.col_start, r.col_end))
            .collect()
    }

    #[test]
    fn test_detects_trailing_spaces_and_tabs() {
        let found = check("a  \nb\nc\t\r\n", &TrailingWhitespace::new());
        assert_eq!(found, vec![(1, 2, 4), (3, 2, 3)]);
    }

    #[test]
    fn test_cr_only_document_has_one_result_per_line() {
        let linter = TrailingWhitespace::new();
        assert_eq!(check("a \rb \r", &linter), vec![(1, 2, 3), (2, 2, 3)]);
        assert_eq!(check("a \rb \r", &linter), check("a \r\nb \r\n", &linter));
    }

    #[test]
    fn test_blank_lines_can_be_skipped() {
        let linter = TrailingWhitespace::new().include_blank_lines(false);
        assert!(check("x\n   \ny\n", &linter).is_empty());
        assert_eq!(check("x\n   \ny\n", &TrailingWhitespace::new()).len(), 1);
    }

    #[test]
    fn test_clean_text() {
        assert!(check("fn main() {}\n", &TrailingWhitespace::new()).is_empty());
    }
}
