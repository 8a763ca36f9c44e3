//! Base indentation routines shared by every language service.
//!
//! These know nothing about families: they look at the current line, at
//! the braces that the [`StyleInfo`] marks as operators, and at the
//! buffer's indent settings.

use crate::buffer::EditorBuffer;
use crate::family::StyleId;
use crate::style_info::StyleInfo;

/// How a character affects the indentation of the following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// No effect.
    None,
    /// Opens a block; the next line is indented.
    Indent,
    /// Closes a block; the line is dedented.
    Dedent,
}

/// Edit requested in response to a keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing to do.
    None,
    /// Replace the leading whitespace of `line` with `indent`.
    Reindent {
        /// Zero-based line number.
        line: usize,
        /// New leading whitespace.
        indent: String,
    },
}

impl KeyAction {
    /// Applies the action to `buf`.
    pub fn apply(&self, buf: &mut dyn EditorBuffer) {
        if let Self::Reindent { line, indent } = self {
            let start = buf.line_start_position(*line);
            let current = leading_whitespace(&buf.line_text(*line)).len();
            buf.replace_range(start, start + current, indent);
        }
    }
}

/// Returns the leading spaces and tabs of `text`.
#[must_use]
pub fn leading_whitespace(text: &str) -> &str {
    let end = text
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(text.len());
    &text[..end]
}

/// Indent for a new line inserted at the caret.
///
/// Keeps the current line's indentation and adds one level when the text
/// before the caret leaves a block open.
#[must_use]
pub fn compute_indent(buf: &dyn EditorBuffer, info: &StyleInfo) -> String {
    let settings = buf.indent_settings();
    let caret = buf.current_position();
    let line_start = buf.line_start_position(buf.line_from_position(caret));
    let text = buf.text_range(line_start, caret);

    let mut columns = settings.columns(leading_whitespace(&text));
    if open_depth(buf, line_start, &text, info) > 0 {
        columns += settings.width;
    }
    settings.make_indent(columns)
}

/// Indent for a new line that continues a comment.
#[must_use]
pub fn continue_comment(buf: &dyn EditorBuffer) -> String {
    let caret = buf.current_position();
    let line_start = buf.line_start_position(buf.line_from_position(caret));
    let text = buf.text_range(line_start, caret);
    let leading = leading_whitespace(&text);
    let rest = &text[leading.len()..];

    if rest.starts_with("/*") && !rest.contains("*/") {
        return format!("{leading} * ");
    }
    if rest.starts_with('*') && !rest.starts_with("*/") {
        return format!("{leading}* ");
    }
    for prefix in ["//", "#", "--"] {
        if rest.starts_with(prefix) {
            return format!("{leading}{prefix} ");
        }
    }
    leading.to_string()
}

/// Classifies `ch` with style `style` as a block opener or closer.
#[must_use]
pub fn brace_indent_style(ch: char, style: StyleId, info: &StyleInfo) -> IndentStyle {
    if !info.is_operator(style) {
        IndentStyle::None
    } else if info.opens_block(ch) {
        IndentStyle::Indent
    } else if info.closes_block(ch) {
        IndentStyle::Dedent
    } else {
        IndentStyle::None
    }
}

/// Reacts to `ch` having just been typed before the caret.
///
/// A closing brace typed on an otherwise blank line is aligned with the
/// line holding its opener, or dedented one level if no opener is found.
#[must_use]
pub fn key_pressed(buf: &dyn EditorBuffer, ch: char, info: &StyleInfo) -> KeyAction {
    if !info.closes_block(ch) {
        return KeyAction::None;
    }
    let brace = buf.position_before(buf.current_position());
    if buf.char_at(brace) != Some(ch) || !info.is_operator(buf.style_at(brace)) {
        return KeyAction::None;
    }

    let line = buf.line_from_position(brace);
    let before = buf.text_range(buf.line_start_position(line), brace);
    if !before.trim().is_empty() {
        return KeyAction::None;
    }

    let settings = buf.indent_settings();
    let columns = match matching_opener_line(buf, brace, ch, info) {
        Some(open_line) => settings.columns(leading_whitespace(&buf.line_text(open_line))),
        None => settings.columns(&before).saturating_sub(settings.width),
    };
    let indent = settings.make_indent(columns);
    if indent == before {
        KeyAction::None
    } else {
        KeyAction::Reindent { line, indent }
    }
}

fn open_depth(buf: &dyn EditorBuffer, start: usize, text: &str, info: &StyleInfo) -> usize {
    let mut depth = 0usize;
    for (offset, ch) in text.char_indices() {
        let opens = info.opens_block(ch);
        if !(opens || info.closes_block(ch)) || !info.is_operator(buf.style_at(start + offset)) {
            continue;
        }
        if opens {
            depth += 1;
        } else {
            depth = depth.saturating_sub(1);
        }
    }
    depth
}

fn matching_opener_line(
    buf: &dyn EditorBuffer,
    brace: usize,
    close: char,
    info: &StyleInfo,
) -> Option<usize> {
    let expected = info.opener_for(close)?;
    let text = buf.text_range(0, brace);
    let mut depth = 0usize;
    for (offset, ch) in text.char_indices().rev() {
        if !info.is_operator(buf.style_at(offset)) {
            continue;
        }
        if info.closes_block(ch) {
            depth += 1;
        } else if info.opens_block(ch) {
            if depth == 0 {
                return (ch == expected).then(|| buf.line_from_position(offset));
            }
            depth -= 1;
        }
    }
    None
}
