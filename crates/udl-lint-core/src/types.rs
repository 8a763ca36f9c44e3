//! Core types for lint findings and result sets.

use crate::checks::split_lines;
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};

/// Severity level for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown severity `{other}`. Valid values: error, warning, info"
            )),
        }
    }
}

/// A single lint finding.
///
/// Lines and columns are 1-indexed; columns count characters, and
/// `col_end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// Severity of the finding.
    pub severity: Severity,
    /// First line of the span.
    pub line_start: usize,
    /// First column of the span.
    pub col_start: usize,
    /// Last line of the span.
    pub line_end: usize,
    /// Column just past the span on `line_end`.
    pub col_end: usize,
    /// Human-readable message.
    pub description: String,
    /// Name of the linter or check that produced the finding.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl LintResult {
    /// Creates a finding on a single line.
    #[must_use]
    pub fn new(
        severity: Severity,
        line: usize,
        col_start: usize,
        col_end: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            line_start: line,
            col_start,
            line_end: line,
            col_end,
            description: description.into(),
            source: String::new(),
        }
    }

    /// Extends the span to end on another line.
    #[must_use]
    pub fn ending_at(mut self, line_end: usize, col_end: usize) -> Self {
        self.line_end = line_end;
        self.col_end = col_end;
        self
    }

    /// Records which linter produced the finding.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{}:{}-{}:{}",
            self.line_start, self.col_start, self.line_end, self.col_end
        );
        if !self.source.is_empty() {
            let _ = write!(output, " [{}]", self.source);
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "  {}: {}", self.severity, self.description);
        output
    }

    /// Byte span of the finding within `content`.
    #[must_use]
    pub fn byte_span(&self, content: &str) -> (usize, usize) {
        let start = offset_for(content, self.line_start, self.col_start);
        let end = offset_for(content, self.line_end, self.col_end).max(start);
        (start, end - start)
    }
}

impl std::fmt::Display for LintResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} {}",
            self.line_start, self.col_start, self.severity, self.description
        )?;
        if !self.source.is_empty() {
            write!(f, " ({})", self.source)?;
        }
        Ok(())
    }
}

/// Byte offset of a 1-indexed line and character column.
fn offset_for(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, (body, terminator)) in split_lines(content).into_iter().enumerate() {
        if i + 1 == line {
            let col = column.saturating_sub(1);
            return offset
                + body
                    .char_indices()
                    .nth(col)
                    .map_or(body.len(), |(i, _)| i);
        }
        offset += body.len() + terminator.len();
    }
    content.len()
}

/// Converts a finding to a miette diagnostic for rich display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct LintDiagnostic {
    message: String,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

impl LintDiagnostic {
    /// Builds the diagnostic for `result` found in `content`.
    #[must_use]
    pub fn new(result: &LintResult, content: &str) -> Self {
        Self {
            message: format!("{}: {}", result.severity, result.description),
            span: SourceSpan::from(result.byte_span(content)),
            label: if result.source.is_empty() {
                result.severity.to_string()
            } else {
                result.source.clone()
            },
            help: None,
        }
    }
}

/// An ordered set of lint results for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintResults {
    entries: Vec<LintResult>,
}

impl LintResults {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result.
    pub fn add(&mut self, result: LintResult) {
        self.entries.push(result);
    }

    /// Appends every entry of `other`, without de-duplication.
    pub fn merge_from(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the results in order.
    pub fn iter(&self) -> std::slice::Iter<'_, LintResult> {
        self.entries.iter()
    }

    /// The results as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[LintResult] {
        &self.entries
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|r| r.severity == Severity::Error)
    }

    /// Checks if any result meets or exceeds the given severity.
    #[must_use]
    pub fn has_results_at(&self, severity: Severity) -> bool {
        self.entries.iter().any(|r| r.severity >= severity)
    }

    /// Counts results as `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| self.entries.iter().filter(|r| r.severity == severity).count();
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Sorts results by position.
    pub fn sort_by_position(&mut self) {
        self.entries
            .sort_by_key(|r| (r.line_start, r.col_start, r.line_end, r.col_end));
    }
}

impl From<Vec<LintResult>> for LintResults {
    fn from(entries: Vec<LintResult>) -> Self {
        Self { entries }
    }
}

impl FromIterator<LintResult> for LintResults {
    fn from_iter<I: IntoIterator<Item = LintResult>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LintResults {
    type Item = LintResult;
    type IntoIter = std::vec::IntoIter<LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LintResults {
    type Item = &'a LintResult;
    type IntoIter = std::slice::Iter<'a, LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
