//! Content checks the worker runs around the linter.

pub mod encoding;
pub mod eol;

/// Splits `content` into `(body, terminator)` pairs.
///
/// A terminator is `"\r\n"`, `"\n"`, `"\r"` or empty for a final
/// unterminated line. Empty content yields no lines. Line numbers in
/// every [`LintResult`](crate::LintResult) refer to this split.
#[must_use]
pub fn split_lines(content: &str) -> Vec<(&str, &str)> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push((&content[start..i], &content[i..=i]));
                i += 1;
                start = i;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 2 } else { i + 1 };
                lines.push((&content[start..i], &content[i..end]));
                i = end;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < content.len() {
        lines.push((&content[start..], ""));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::split_lines;

    #[test]
    fn splits_every_terminator_kind() {
        assert_eq!(
            split_lines("a\nb\r\nc\rd"),
            vec![("a", "\n"), ("b", "\r\n"), ("c", "\r"), ("d", "")]
        );
    }

    #[test]
    fn trailing_terminator_adds_no_empty_line() {
        assert_eq!(split_lines("a\n"), vec![("a", "\n")]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n\n"), vec![("", "\n"), ("", "\n")]);
    }
}
