//! Per-family style descriptors handed to indentation routines.

use crate::family::{styles, Family, StyleId};

/// Which styles of a family carry meaning for indentation.
///
/// A delegate language service receives the descriptor of the family it
/// was resolved for, so it can interpret UDL style ids without knowing the
/// composite lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleInfo {
    /// Owning family, if this descriptor belongs to a UDL family.
    pub family: Option<Family>,
    /// Whitespace styles.
    pub default_styles: &'static [StyleId],
    /// Comment styles.
    pub comment_styles: &'static [StyleId],
    /// String styles.
    pub string_styles: &'static [StyleId],
    /// Operator styles. `None` accepts every style.
    pub operator_styles: Option<&'static [StyleId]>,
    /// Characters that open an indented block.
    pub indent_open_chars: &'static str,
    /// Characters that close an indented block.
    pub indent_close_chars: &'static str,
}

const BRACES_OPEN: &str = "{[(";
const BRACES_CLOSE: &str = "}])";

static MARKUP: StyleInfo = StyleInfo {
    family: Some(Family::Markup),
    default_styles: &[styles::M_DEFAULT],
    comment_styles: &[styles::M_COMMENT],
    string_styles: &[styles::M_STRING, styles::M_CDATA],
    operator_styles: Some(&[styles::M_OPERATOR]),
    indent_open_chars: "",
    indent_close_chars: "",
};

static CSS: StyleInfo = StyleInfo {
    family: Some(Family::Css),
    default_styles: &[styles::CSS_DEFAULT],
    comment_styles: &[styles::CSS_COMMENT],
    string_styles: &[styles::CSS_STRING],
    operator_styles: Some(&[styles::CSS_OPERATOR]),
    indent_open_chars: "{",
    indent_close_chars: "}",
};

static CSL: StyleInfo = StyleInfo {
    family: Some(Family::Csl),
    default_styles: &[styles::CSL_DEFAULT],
    comment_styles: &[styles::CSL_COMMENT, styles::CSL_COMMENTBLOCK],
    string_styles: &[styles::CSL_STRING, styles::CSL_REGEX],
    operator_styles: Some(&[styles::CSL_OPERATOR]),
    indent_open_chars: BRACES_OPEN,
    indent_close_chars: BRACES_CLOSE,
};

static SSL: StyleInfo = StyleInfo {
    family: Some(Family::Ssl),
    default_styles: &[styles::SSL_DEFAULT],
    comment_styles: &[styles::SSL_COMMENT, styles::SSL_COMMENTBLOCK],
    string_styles: &[styles::SSL_STRING, styles::SSL_REGEX],
    operator_styles: Some(&[styles::SSL_OPERATOR]),
    indent_open_chars: BRACES_OPEN,
    indent_close_chars: BRACES_CLOSE,
};

static TPL: StyleInfo = StyleInfo {
    family: Some(Family::Tpl),
    default_styles: &[styles::TPL_DEFAULT],
    comment_styles: &[styles::TPL_COMMENT, styles::TPL_COMMENTBLOCK],
    string_styles: &[styles::TPL_STRING, styles::TPL_REGEX],
    operator_styles: Some(&[styles::TPL_OPERATOR]),
    indent_open_chars: BRACES_OPEN,
    indent_close_chars: BRACES_CLOSE,
};

static PLAIN: StyleInfo = StyleInfo {
    family: None,
    default_styles: &[],
    comment_styles: &[],
    string_styles: &[],
    operator_styles: None,
    indent_open_chars: BRACES_OPEN,
    indent_close_chars: BRACES_CLOSE,
};

impl StyleInfo {
    /// Descriptor for a UDL family.
    #[must_use]
    pub fn for_family(family: Family) -> &'static Self {
        match family {
            Family::Markup => &MARKUP,
            Family::Css => &CSS,
            Family::Csl => &CSL,
            Family::Ssl => &SSL,
            Family::Tpl => &TPL,
        }
    }

    /// Descriptor that treats every style as code.
    #[must_use]
    pub fn plain() -> &'static Self {
        &PLAIN
    }

    /// Returns true if a brace with this style counts for indentation.
    #[must_use]
    pub fn is_operator(&self, style: StyleId) -> bool {
        self.operator_styles
            .map_or(true, |operators| operators.contains(&style))
    }

    /// Returns true if `style` is a comment style.
    #[must_use]
    pub fn is_comment(&self, style: StyleId) -> bool {
        self.comment_styles.contains(&style)
    }

    /// Returns true if `ch` opens a block.
    #[must_use]
    pub fn opens_block(&self, ch: char) -> bool {
        self.indent_open_chars.contains(ch)
    }

    /// Returns true if `ch` closes a block.
    #[must_use]
    pub fn closes_block(&self, ch: char) -> bool {
        self.indent_close_chars.contains(ch)
    }

    /// Returns the opener matching a closing character.
    #[must_use]
    pub fn opener_for(&self, close: char) -> Option<char> {
        let index = self.indent_close_chars.chars().position(|c| c == close)?;
        self.indent_open_chars.chars().nth(index)
    }
}
