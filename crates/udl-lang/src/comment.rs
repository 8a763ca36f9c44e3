//! Commenting and uncommenting of line ranges.

use crate::buffer::EditorBuffer;
use crate::indent::leading_whitespace;

/// Comment syntax of a language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDelimiters {
    /// Line comment prefix, e.g. `//`.
    pub line: Option<String>,
    /// Block comment delimiters, e.g. `("/*", "*/")`.
    pub block: Option<(String, String)>,
}

impl CommentDelimiters {
    /// No comment syntax.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Line comments only.
    #[must_use]
    pub fn line(prefix: impl Into<String>) -> Self {
        Self {
            line: Some(prefix.into()),
            block: None,
        }
    }

    /// Block comments only.
    #[must_use]
    pub fn block(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            line: None,
            block: Some((open.into(), close.into())),
        }
    }

    /// Adds block delimiters.
    #[must_use]
    pub fn with_block(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.block = Some((open.into(), close.into()));
        self
    }

    /// Returns true if neither line nor block syntax is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line.is_none() && self.block.is_none()
    }
}

/// Direction of a comment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOp {
    /// Comment out.
    Comment,
    /// Remove comment markers.
    Uncomment,
}

/// Result of a comment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    /// The buffer was edited.
    Applied,
    /// Nothing matched; the buffer is unchanged.
    Unchanged,
    /// The request was refused and a status message was emitted.
    Refused,
}

/// Comments line ranges using one language's delimiters.
///
/// Line comments are inserted at the smallest indentation of the non-blank
/// lines. Languages without line comments get the whole range wrapped in a
/// single block comment.
#[derive(Debug, Clone)]
pub struct Commenter {
    delimiters: CommentDelimiters,
}

impl Commenter {
    /// Creates a commenter for the given syntax.
    #[must_use]
    pub fn new(delimiters: CommentDelimiters) -> Self {
        Self { delimiters }
    }

    /// The delimiters in use.
    #[must_use]
    pub fn delimiters(&self) -> &CommentDelimiters {
        &self.delimiters
    }

    /// Applies `op` to the lines touched by `start..end`.
    pub fn apply(
        &self,
        buf: &mut dyn EditorBuffer,
        op: CommentOp,
        start: usize,
        end: usize,
    ) -> CommentOutcome {
        let (first, last) = line_span(buf, start, end);
        let changed = match (&self.delimiters.line, &self.delimiters.block, op) {
            (Some(prefix), _, CommentOp::Comment) => comment_lines(buf, prefix, first, last),
            (Some(prefix), _, CommentOp::Uncomment) => uncomment_lines(buf, prefix, first, last),
            (None, Some((open, close)), CommentOp::Comment) => {
                wrap_block(buf, open, close, first, last)
            }
            (None, Some((open, close)), CommentOp::Uncomment) => {
                unwrap_block(buf, open, close, first, last)
            }
            (None, None, _) => false,
        };

        if changed {
            let region_end = buf.line_end_position(last);
            buf.set_selection(buf.line_start_position(first), region_end);
            CommentOutcome::Applied
        } else {
            CommentOutcome::Unchanged
        }
    }
}

/// Lines covered by a selection. A selection ending at column 0 does not
/// include that last line.
fn line_span(buf: &dyn EditorBuffer, start: usize, end: usize) -> (usize, usize) {
    let first = buf.line_from_position(start);
    let mut last = buf.line_from_position(end);
    if end > start && last > first && end == buf.line_start_position(last) {
        last -= 1;
    }
    (first, last)
}

fn comment_lines(buf: &mut dyn EditorBuffer, prefix: &str, first: usize, last: usize) -> bool {
    let column = (first..=last)
        .map(|line| buf.line_text(line))
        .filter(|text| !text.trim().is_empty())
        .map(|text| leading_whitespace(&text).len())
        .min();
    let Some(column) = column else {
        return false;
    };

    let marker = format!("{prefix} ");
    for line in (first..=last).rev() {
        if buf.line_text(line).trim().is_empty() {
            continue;
        }
        let at = buf.line_start_position(line) + column;
        buf.replace_range(at, at, &marker);
    }
    true
}

fn uncomment_lines(buf: &mut dyn EditorBuffer, prefix: &str, first: usize, last: usize) -> bool {
    let mut changed = false;
    for line in (first..=last).rev() {
        let text = buf.line_text(line);
        let indent = leading_whitespace(&text).len();
        let Some(rest) = text[indent..].strip_prefix(prefix) else {
            continue;
        };
        let mut remove = prefix.len();
        if rest.starts_with(' ') {
            remove += 1;
        }
        let at = buf.line_start_position(line) + indent;
        buf.replace_range(at, at + remove, "");
        changed = true;
    }
    changed
}

fn wrap_block(
    buf: &mut dyn EditorBuffer,
    open: &str,
    close: &str,
    first: usize,
    last: usize,
) -> bool {
    let first_text = buf.line_text(first);
    if (first..=last).all(|line| buf.line_text(line).trim().is_empty()) {
        return false;
    }
    let start = buf.line_start_position(first) + leading_whitespace(&first_text).len();
    let end = buf.line_end_position(last);
    buf.replace_range(end, end, &format!(" {close}"));
    buf.replace_range(start, start, &format!("{open} "));
    true
}

fn unwrap_block(
    buf: &mut dyn EditorBuffer,
    open: &str,
    close: &str,
    first: usize,
    last: usize,
) -> bool {
    let first_text = buf.line_text(first);
    let start = buf.line_start_position(first) + leading_whitespace(&first_text).len();
    let end = buf.line_end_position(last);
    let region = buf.text_range(start, end);
    let trimmed = region.trim_end();
    if !trimmed.starts_with(open)
        || !trimmed.ends_with(close)
        || trimmed.len() < open.len() + close.len()
    {
        return false;
    }

    let mut close_start = start + trimmed.len() - close.len();
    if trimmed[..trimmed.len() - close.len()].ends_with(' ') {
        close_start -= 1;
    }
    buf.replace_range(close_start, start + trimmed.len(), "");

    let mut open_len = open.len();
    if region[open.len()..].starts_with(' ') && close_start > start + open.len() {
        open_len += 1;
    }
    buf.replace_range(start, start + open_len, "");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::StyledBuffer;
    use crate::family::styles::*;

    fn select_all(text: &str) -> StyledBuffer {
        let buf = StyledBuffer::new().push(text, CSL_IDENTIFIER);
        let len = buf.len();
        buf.with_selection(0, len)
    }

    #[test]
    fn line_comments_use_the_common_indent() {
        let mut buf = select_all("  a\n    b\n\n  c");
        let commenter = Commenter::new(CommentDelimiters::line("//"));
        let len = buf.len();
        let outcome = commenter.apply(&mut buf, CommentOp::Comment, 0, len);
        assert_eq!(outcome, CommentOutcome::Applied);
        assert_eq!(buf.text(), "  // a\n  //   b\n\n  // c");
    }

    #[test]
    fn line_comment_round_trip() {
        let original = "if x:\n    y()\n";
        let mut buf = select_all(original);
        let commenter = Commenter::new(CommentDelimiters::line("#"));
        let (start, end) = buf.selection();
        commenter.apply(&mut buf, CommentOp::Comment, start, end);
        assert_eq!(buf.text(), "# if x:\n#     y()\n");
        let (start, end) = buf.selection();
        commenter.apply(&mut buf, CommentOp::Uncomment, start, end);
        assert_eq!(buf.text(), original);
    }

    #[test]
    fn selection_ending_at_column_zero_skips_that_line() {
        let mut buf = select_all("a\nb\nc");
        let commenter = Commenter::new(CommentDelimiters::line("//"));
        commenter.apply(&mut buf, CommentOp::Comment, 0, 2);
        assert_eq!(buf.text(), "// a\nb\nc");
    }

    #[test]
    fn block_comment_round_trip() {
        let original = "  <p>hi</p>\n  <br/>";
        let mut buf = select_all(original);
        let commenter = Commenter::new(CommentDelimiters::block("<!--", "-->"));
        let len = buf.len();
        commenter.apply(&mut buf, CommentOp::Comment, 0, len);
        assert_eq!(buf.text(), "  <!-- <p>hi</p>\n  <br/> -->");
        let len = buf.len();
        commenter.apply(&mut buf, CommentOp::Uncomment, 0, len);
        assert_eq!(buf.text(), original);
    }

    #[test]
    fn uncommenting_plain_text_is_unchanged() {
        let mut buf = select_all("a\nb");
        let commenter = Commenter::new(CommentDelimiters::line("//"));
        let outcome = commenter.apply(&mut buf, CommentOp::Uncomment, 0, 3);
        assert_eq!(outcome, CommentOutcome::Unchanged);
        assert_eq!(buf.text(), "a\nb");
    }

    #[test]
    fn no_delimiters_means_no_edit() {
        let mut buf = select_all("a");
        let commenter = Commenter::new(CommentDelimiters::none());
        assert_eq!(
            commenter.apply(&mut buf, CommentOp::Comment, 0, 1),
            CommentOutcome::Unchanged
        );
    }
}
