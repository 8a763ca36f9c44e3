//! Mixed line-terminator check.

use super::split_lines;
use crate::types::{LintResult, LintResults, Severity};
use serde::{Deserialize, Serialize};

/// Source name attached to EOL findings.
pub const SOURCE: &str = "mixed-eol";

/// A line terminator style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolMode {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl EolMode {
    /// The terminator itself.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Configuration name (`lf`, `crlf`, `cr`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
            Self::Cr => "cr",
        }
    }

    /// The terminator with escapes, as shown in messages.
    #[must_use]
    pub fn escaped(self) -> &'static str {
        match self {
            Self::Lf => "\\n",
            Self::CrLf => "\\r\\n",
            Self::Cr => "\\r",
        }
    }

    /// Parses a configuration name or a literal terminator.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "\n" => return Some(Self::Lf),
            "\r\n" => return Some(Self::CrLf),
            "\r" => return Some(Self::Cr),
            _ => {}
        }
        match value.trim().to_ascii_lowercase().as_str() {
            "lf" | "\\n" => Some(Self::Lf),
            "crlf" | "\\r\\n" => Some(Self::CrLf),
            "cr" | "\\r" => Some(Self::Cr),
            _ => None,
        }
    }
}

impl std::str::FromStr for EolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown EOL `{s}`. Valid values: lf, crlf, cr"))
    }
}

impl std::fmt::Display for EolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Warns about runs of lines whose terminator is not `expected`.
///
/// Consecutive offending lines collapse into one warning spanning from the
/// first column of the first line to the end of the last. A final line
/// with no terminator is never reported.
#[must_use]
pub fn mixed_eol_results(content: &str, expected: EolMode) -> LintResults {
    let mut results = LintResults::new();
    let mut run: Option<(usize, usize, usize)> = None;

    for (index, (body, terminator)) in split_lines(content).into_iter().enumerate() {
        let line = index + 1;
        if terminator.is_empty() || terminator == expected.as_str() {
            if let Some((first, last, width)) = run.take() {
                results.add(mismatch(expected, first, last, width));
            }
            continue;
        }
        let width = body.chars().count();
        run = Some(match run {
            Some((first, _, _)) => (first, line, width),
            None => (line, line, width),
        });
    }
    if let Some((first, last, width)) = run {
        results.add(mismatch(expected, first, last, width));
    }
    results
}

fn mismatch(expected: EolMode, first: usize, last: usize, width: usize) -> LintResult {
    LintResult::new(
        Severity::Warning,
        first,
        1,
        width + 1,
        format!(
            "This line does not end with the expected EOL: '{}'",
            expected.escaped()
        ),
    )
    .ending_at(last, width + 1)
    .with_source(SOURCE)
}
