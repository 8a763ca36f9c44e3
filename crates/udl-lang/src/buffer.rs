//! Editor buffer collaborator and an in-memory implementation.

use crate::family::{styles, StyleId};

/// Indentation preferences of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentSettings {
    /// Columns per indent level (also the tab width).
    pub width: usize,
    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for IndentSettings {
    fn default() -> Self {
        Self {
            width: 4,
            use_tabs: false,
        }
    }
}

impl IndentSettings {
    /// Builds the whitespace for an indent of `columns` columns.
    #[must_use]
    pub fn make_indent(&self, columns: usize) -> String {
        if self.use_tabs && self.width > 0 {
            let mut indent = "\t".repeat(columns / self.width);
            indent.push_str(&" ".repeat(columns % self.width));
            indent
        } else {
            " ".repeat(columns)
        }
    }

    /// Measures the width in columns of a run of leading whitespace.
    #[must_use]
    pub fn columns(&self, whitespace: &str) -> usize {
        let width = self.width.max(1);
        whitespace.chars().fold(0, |col, ch| match ch {
            '\t' => (col / width + 1) * width,
            _ => col + 1,
        })
    }
}

/// Access to a styled text buffer owned by the editor.
///
/// Positions are byte offsets. Lines are zero-based. Positions at or past
/// the end report the style of the last character.
pub trait EditorBuffer {
    /// Buffer length in bytes.
    fn len(&self) -> usize;

    /// Returns true for an empty buffer.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Style of the character at `pos`.
    fn style_at(&self, pos: usize) -> StyleId;

    /// Character starting at `pos`.
    fn char_at(&self, pos: usize) -> Option<char>;

    /// Caret position.
    fn current_position(&self) -> usize;

    /// Start of the character before `pos` (0 stays 0).
    fn position_before(&self, pos: usize) -> usize;

    /// Start of the character after `pos` (the end stays the end).
    fn position_after(&self, pos: usize) -> usize;

    /// Number of lines, at least 1.
    fn line_count(&self) -> usize;

    /// Line containing `pos`.
    fn line_from_position(&self, pos: usize) -> usize;

    /// First position of `line`.
    fn line_start_position(&self, line: usize) -> usize;

    /// Position of the line terminator of `line` (or the buffer end).
    fn line_end_position(&self, line: usize) -> usize;

    /// Text between two positions.
    fn text_range(&self, start: usize, end: usize) -> String;

    /// Text of `line` without its terminator.
    fn line_text(&self, line: usize) -> String {
        self.text_range(self.line_start_position(line), self.line_end_position(line))
    }

    /// Selection as `(start, end)` with `start <= end`.
    fn selection(&self) -> (usize, usize);

    /// Moves the selection.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Replaces `start..end` with `text`.
    fn replace_range(&mut self, start: usize, end: usize, text: &str);

    /// Indentation preferences for this buffer.
    fn indent_settings(&self) -> IndentSettings {
        IndentSettings::default()
    }
}

/// Receives user-visible status messages.
pub trait StatusReporter {
    /// Shows a message in the status bar.
    fn status_message(&mut self, message: &str);
}

impl StatusReporter for Vec<String> {
    fn status_message(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// An in-memory styled buffer.
///
/// Hosts normally wrap their own editor widget; this type serves tools and
/// tests that already know the style of every character.
///
/// ```
/// use udl_lang::{EditorBuffer, StyledBuffer};
/// use udl_lang::styles::*;
///
/// let buf = StyledBuffer::new()
///     .push("<p>", M_TAGNAME)
///     .push("\n", M_DEFAULT)
///     .with_cursor_at_end();
/// assert_eq!(buf.line_count(), 2);
/// assert_eq!(buf.style_at(0), M_TAGNAME);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer {
    text: String,
    styles: Vec<StyleId>,
    line_starts: Vec<usize>,
    anchor: usize,
    caret: usize,
    indent: IndentSettings,
}

impl StyledBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
            ..Self::default()
        }
    }

    /// Appends `text` lexed as `style`.
    #[must_use]
    pub fn push(mut self, text: &str, style: StyleId) -> Self {
        self.text.push_str(text);
        self.styles
            .extend(std::iter::repeat(style).take(text.len()));
        self.reindex();
        self
    }

    /// Places the caret (and collapses the selection) at `pos`.
    #[must_use]
    pub fn with_cursor(mut self, pos: usize) -> Self {
        let pos = pos.min(self.text.len());
        self.anchor = pos;
        self.caret = pos;
        self
    }

    /// Places the caret at the end of the buffer.
    #[must_use]
    pub fn with_cursor_at_end(self) -> Self {
        let end = self.text.len();
        self.with_cursor(end)
    }

    /// Selects `start..end`.
    #[must_use]
    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.set_selection(start, end);
        self
    }

    /// Overrides the indentation preferences.
    #[must_use]
    pub fn with_indent(mut self, indent: IndentSettings) -> Self {
        self.indent = indent;
        self
    }

    /// Full buffer text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn reindex(&mut self) {
        self.line_starts.clear();
        self.line_starts.push(0);
        self.line_starts.extend(
            self.text
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
    }

    fn clamp(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

impl EditorBuffer for StyledBuffer {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn style_at(&self, pos: usize) -> StyleId {
        self.styles
            .get(pos)
            .or_else(|| self.styles.last())
            .copied()
            .unwrap_or(styles::M_DEFAULT)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn current_position(&self) -> usize {
        self.caret
    }

    fn position_before(&self, pos: usize) -> usize {
        let pos = self.clamp(pos);
        self.text[..pos]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn position_after(&self, pos: usize) -> usize {
        let pos = self.clamp(pos);
        self.text[pos..]
            .chars()
            .next()
            .map_or(pos, |ch| pos + ch.len_utf8())
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_from_position(&self, pos: usize) -> usize {
        let pos = pos.min(self.text.len());
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    fn line_start_position(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len())
    }

    fn line_end_position(&self, line: usize) -> usize {
        let Some(next_start) = self.line_starts.get(line + 1) else {
            return self.text.len();
        };
        let newline = next_start - 1;
        if newline > 0 && self.text.as_bytes()[newline - 1] == b'\r' {
            newline - 1
        } else {
            newline
        }
    }

    fn text_range(&self, start: usize, end: usize) -> String {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);
        self.text[start..end].to_string()
    }

    fn selection(&self) -> (usize, usize) {
        (self.anchor.min(self.caret), self.anchor.max(self.caret))
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.anchor = self.clamp(start);
        self.caret = self.clamp(end);
    }

    fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);
        let style = if start < self.styles.len() {
            self.styles[start]
        } else {
            self.style_at(start)
        };

        self.text.replace_range(start..end, text);
        self.styles.splice(
            start..end,
            std::iter::repeat(style).take(text.len()),
        );
        self.reindex();

        let shift = |pos: usize| {
            if pos <= start {
                pos
            } else if pos >= end {
                pos - (end - start) + text.len()
            } else {
                start + text.len()
            }
        };
        self.anchor = shift(self.anchor);
        self.caret = shift(self.caret);
    }

    fn indent_settings(&self) -> IndentSettings {
        self.indent
    }
}
