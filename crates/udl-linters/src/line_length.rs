//! Linter for overlong lines.

use crate::numbered_lines;
use udl_lint_core::{LintError, LintRequest, LintResult, LintResults, Linter, Severity};

/// Linter code for line-length.
pub const CODE: &str = "UL002";

/// Linter name for line-length.
pub const NAME: &str = "line-length";

/// Default maximum line length in characters.
pub const DEFAULT_MAX_LENGTH: usize = 120;

/// Flags lines longer than a character limit.
#[derive(Debug, Clone)]
pub struct LineLength {
    /// Longest allowed line, in characters.
    pub max_length: usize,
    /// Severity of reported findings.
    pub severity: Severity,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates the linter with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            severity: Severity::Warning,
        }
    }

    /// Sets the limit.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Linter for LineLength {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn description(&self) -> &str {
        "Limits the length of a line"
    }

    fn lint_with_text(&self, _: &LintRequest, text: &str) -> Result<LintResults, LintError> {
        Ok(numbered_lines(text)
            .filter_map(|(line, body)| {
                let width = body.chars().count();
                (width > self.max_length).then(|| {
                    LintResult::new(
                        self.severity,
                        line,
                        self.max_length + 1,
                        width + 1,
                        format!(
                            "Line is {width} characters long (maximum {})",
                            self.max_length
                        ),
                    )
                    .with_source(NAME)
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_only_long_lines() {
        let linter = LineLength::new().max_length(5);
        let results = linter
            .lint(&LintRequest::new("t", "Text", "short\ntoo long\n"))
            .expect("never fails");
        assert_eq!(results.len(), 1);
        let r = &results.as_slice()[0];
        assert_eq!((r.line_start, r.col_start, r.col_end), (2, 6, 9));
        insta::assert_snapshot!(r.description.as_str(), @"Line is 8 characters long (maximum 5)");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let linter = LineLength::new().max_length(3);
        let results = linter
            .lint(&LintRequest::new("t", "Text", "ééé\n"))
            .expect("never fails");
        assert!(results.is_empty());
    }
}
