//! Linter for unmatched brackets.
//!
//! Tracks `()`, `[]` and `{}` across the whole text. Brackets inside
//! double-quoted strings are ignored; a string never spans lines.

use crate::numbered_lines;
use udl_lint_core::{LintError, LintRequest, LintResult, LintResults, Linter, Severity};

/// Linter code for unbalanced-brackets.
pub const CODE: &str = "UL004";

/// Linter name for unbalanced-brackets.
pub const NAME: &str = "unbalanced-brackets";

/// Flags closers without an opener and openers never closed.
#[derive(Debug, Clone)]
pub struct UnbalancedBrackets {
    /// Severity of reported findings.
    pub severity: Severity,
}

impl Default for UnbalancedBrackets {
    fn default() -> Self {
        Self::new()
    }
}

impl UnbalancedBrackets {
    /// Creates the linter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn finding(&self, line: usize, col: usize, message: String) -> LintResult {
        LintResult::new(self.severity, line, col, col + 1, message).with_source(NAME)
    }
}

fn opener_for(closer: char) -> Option<char> {
    match closer {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

impl Linter for UnbalancedBrackets {
    fn name(&self) -> &str {
        NAME
    }

    fn code(&self) -> &str {
        CODE
    }

    fn description(&self) -> &str {
        "Requires brackets to be balanced"
    }

    fn lint_with_text(&self, _: &LintRequest, text: &str) -> Result<LintResults, LintError> {
        let mut results = LintResults::new();
        let mut open: Vec<(char, usize, usize)> = Vec::new();

        for (line, body) in numbered_lines(text) {
            let mut in_string = false;
            let mut escaped = false;
            for (index, ch) in body.chars().enumerate() {
                let col = index + 1;
                if in_string {
                    match ch {
                        _ if escaped => escaped = false,
                        '\\' => escaped = true,
                        '"' => in_string = false,
                        _ => {}
                    }
                    continue;
                }
                match ch {
                    '"' => in_string = true,
                    '(' | '[' | '{' => open.push((ch, line, col)),
                    ')' | ']' | '}' => {
                        let expected = opener_for(ch);
                        match open.last() {
                            Some(&(top, _, _)) if Some(top) == expected => {
                                open.pop();
                            }
                            Some(&(top, _, _)) => {
                                results.add(self.finding(
                                    line,
                                    col,
                                    format!("Expected '{}' but found '{ch}'", closer_for(top)),
                                ));
                                open.pop();
                            }
                            None => {
                                results.add(self.finding(line, col, format!("Unmatched '{ch}'")));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        for (ch, line, col) in open {
            results.add(self.finding(line, col, format!("Unclosed '{ch}'")));
        }
        results.sort_by_position();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(text: &str) -> Vec<String> {
        UnbalancedBrackets::new()
            .lint(&LintRequest::new("t", "Text", text))
            .expect("never fails")
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_balanced_text_is_clean() {
        assert!(messages("f(a[1], {b: 2})\n").is_empty());
    }

    #[test]
    fn test_reports_each_problem_in_order() {
        insta::assert_snapshot!(messages("x)\nf(a]\n{\n").join("\n"), @r"
        1:2: error Unmatched ')' (unbalanced-brackets)
        2:4: error Expected ')' but found ']' (unbalanced-brackets)
        3:1: error Unclosed '{' (unbalanced-brackets)
        ");
    }

    #[test]
    fn test_strings_are_skipped() {
        assert!(messages("s = \"(\\\"\" + x\n").is_empty());
    }
}
