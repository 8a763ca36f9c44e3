//! Encoding check: characters the declared encoding cannot represent.

use super::split_lines;
use crate::error::LintError;
use crate::types::{LintResult, LintResults, Severity};
use encoding_rs::EncoderResult;

/// Source name attached to encoding findings.
pub const SOURCE: &str = "encoding";

/// Labels treated as strict 7-bit ASCII rather than windows-1252.
const ASCII_LABELS: &[&str] = &["ascii", "us-ascii", "ansi_x3.4-1968"];

/// A document encoding resolved from its label.
///
/// Labels follow the WHATWG Encoding Standard, so `latin1` and
/// `iso-8859-1` name windows-1252. `ascii` is the exception and stays
/// 7-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    charset: &'static encoding_rs::Encoding,
    ascii_only: bool,
}

impl Encoding {
    /// UTF-8.
    #[must_use]
    pub fn utf8() -> Self {
        Self {
            charset: encoding_rs::UTF_8,
            ascii_only: false,
        }
    }

    /// Strict 7-bit ASCII.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            charset: encoding_rs::WINDOWS_1252,
            ascii_only: true,
        }
    }

    /// Looks up an encoding by label, ignoring case, `_` vs `-` and a
    /// missing dash (`utf_8`, `latin-1`).
    ///
    /// # Errors
    ///
    /// Returns [`LintError::UnsupportedEncoding`] for unknown labels.
    pub fn from_name(name: &str) -> Result<Self, LintError> {
        let label = name.trim().to_ascii_lowercase();
        if ASCII_LABELS.contains(&label.as_str()) {
            return Ok(Self::ascii());
        }
        [
            label.clone(),
            label.replace('_', "-"),
            label.replace(['_', '-'], ""),
        ]
        .iter()
        .find_map(|candidate| encoding_rs::Encoding::for_label(candidate.as_bytes()))
        .map(|charset| Self {
            charset,
            ascii_only: false,
        })
        .ok_or_else(|| LintError::UnsupportedEncoding {
            name: name.to_string(),
        })
    }

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        if self.ascii_only {
            "us-ascii"
        } else {
            self.charset.name()
        }
    }

    /// Whether every character has a representation in this encoding.
    ///
    /// True for the UTF family, whose output encoding is UTF-8.
    #[must_use]
    pub fn is_unicode(self) -> bool {
        !self.ascii_only && self.charset.output_encoding() == encoding_rs::UTF_8
    }

    /// Decodes `bytes`, or returns `None` if they are malformed in this
    /// encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        if self.ascii_only && !bytes.is_ascii() {
            return None;
        }
        self.charset
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
    }

    /// Byte offsets in `text` of characters the encoder reports as
    /// unmappable.
    fn unmappable_offsets(self, text: &str) -> Vec<usize> {
        if self.ascii_only {
            return text
                .char_indices()
                .filter(|(_, ch)| !ch.is_ascii())
                .map(|(i, _)| i)
                .collect();
        }

        let mut encoder = self.charset.new_encoder();
        let mut scratch = [0u8; 64];
        let mut offsets = Vec::new();
        let mut pos = 0;
        loop {
            let (result, read, _) =
                encoder.encode_from_utf8_without_replacement(&text[pos..], &mut scratch, true);
            pos += read;
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {}
                // the unmappable character has already been consumed
                EncoderResult::Unmappable(ch) => offsets.push(pos - ch.len_utf8()),
            }
        }
        offsets
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reports every run of unencodable characters as an error.
///
/// Each contiguous run on one line yields one result whose columns cover
/// exactly the offending characters. Returns an empty set when the whole
/// content encodes.
#[must_use]
pub fn encoding_results(content: &str, encoding: Encoding) -> LintResults {
    let mut results = LintResults::new();
    if encoding.is_unicode() {
        return results;
    }

    for (index, (body, _)) in split_lines(content).into_iter().enumerate() {
        let bad = encoding.unmappable_offsets(body);
        if bad.is_empty() {
            continue;
        }

        let mut bad = bad.into_iter().peekable();
        let mut run: Option<(usize, String)> = None;
        for (col, (offset, ch)) in body.char_indices().enumerate() {
            if bad.next_if_eq(&offset).is_some() {
                run.get_or_insert_with(|| (col, String::new())).1.push(ch);
            } else if let Some((start, chars)) = run.take() {
                results.add(unencodable(index + 1, start, col, &chars));
            }
        }
        if let Some((start, chars)) = run {
            let end = start + chars.chars().count();
            results.add(unencodable(index + 1, start, end, &chars));
        }
    }
    results
}

fn unencodable(line: usize, start: usize, end: usize, chars: &str) -> LintResult {
    LintResult::new(
        Severity::Error,
        line,
        start + 1,
        end + 1,
        format!("This character cannot be represented with the current encoding: '{chars}'"),
    )
    .with_source(SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(name: &str) -> Encoding {
        Encoding::from_name(name).expect("known label")
    }

    #[test]
    fn labels_are_normalized() {
        assert_eq!(enc("UTF_8"), Encoding::utf8());
        assert_eq!(enc("US-ASCII"), Encoding::ascii());
        assert_eq!(enc("Latin-1").name(), "windows-1252");
        assert_eq!(enc("cp1252").name(), "windows-1252");
        assert_eq!(enc("shift_jis").name(), "Shift_JIS");
        assert!(matches!(
            Encoding::from_name("klingon"),
            Err(LintError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn utf_family_never_fails() {
        assert!(encoding_results("☃ snow", Encoding::utf8()).is_empty());
        assert!(encoding_results("☃ snow", enc("utf-16le")).is_empty());
    }

    #[test]
    fn decode_follows_the_code_page() {
        assert_eq!(
            enc("windows-1252").decode(b"\x80 caf\xe9").as_deref(),
            Some("€ café")
        );
        assert_eq!(Encoding::ascii().decode(b"\xe9"), None);
        assert_eq!(Encoding::utf8().decode(b"\xff"), None);
    }

    #[test]
    fn runs_collapse_per_line() {
        let results = encoding_results("ok\nab☃☃c☃\n", Encoding::ascii());
        assert_eq!(results.len(), 2);

        let first = &results.as_slice()[0];
        assert_eq!(first.severity, Severity::Error);
        assert_eq!((first.line_start, first.col_start, first.col_end), (2, 3, 5));
        assert_eq!(
            first.description,
            "This character cannot be represented with the current encoding: '☃☃'"
        );

        let second = &results.as_slice()[1];
        assert_eq!((second.line_start, second.col_start, second.col_end), (2, 6, 7));
    }

    #[test]
    fn encoder_reports_unmappable_characters() {
        let cp1252 = enc("windows-1252");
        assert!(encoding_results("€ café", cp1252).is_empty());

        let results = encoding_results("x€y☃☃z\nκ", cp1252);
        let spans: Vec<(usize, usize, usize)> = results
            .iter()
            .map(|r| (r.line_start, r.col_start, r.col_end))
            .collect();
        assert_eq!(spans, vec![(1, 4, 6), (2, 1, 2)]);
    }

    #[test]
    fn multibyte_encodings_are_checked_too() {
        let results = encoding_results("日本語 ☃", enc("shift_jis"));
        assert_eq!(results.len(), 1);
        assert_eq!(results.as_slice()[0].col_start, 5);
    }
}
