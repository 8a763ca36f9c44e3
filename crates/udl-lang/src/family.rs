//! Style ids and the five UDL families.
//!
//! The composite lexer assigns each character a [`StyleId`]. Every family
//! owns one closed, contiguous range of ids whose lower bound is that
//! family's "default" (whitespace) style:
//!
//! | Family | Range |
//! |--------|-------|
//! | Markup | `0..=14` |
//! | CSS    | `15..=21` |
//! | CSL    | `22..=30` |
//! | SSL    | `31..=40` |
//! | TPL    | `41..=56` |

use crate::error::LangError;
use std::fmt;
use std::ops::RangeInclusive;

/// A lexer style id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StyleId(pub u8);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for StyleId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Style ids emitted by the composite lexer.
#[allow(missing_docs)]
pub mod styles {
    use super::StyleId;

    pub const M_DEFAULT: StyleId = StyleId(0);
    pub const M_STAGO: StyleId = StyleId(1);
    pub const M_TAGNAME: StyleId = StyleId(2);
    pub const M_TAGSPACE: StyleId = StyleId(3);
    pub const M_ATTRNAME: StyleId = StyleId(4);
    pub const M_OPERATOR: StyleId = StyleId(5);
    pub const M_STAGC: StyleId = StyleId(6);
    pub const M_EMP_TAGC: StyleId = StyleId(7);
    pub const M_STRING: StyleId = StyleId(8);
    pub const M_ETAGO: StyleId = StyleId(9);
    pub const M_ETAGC: StyleId = StyleId(10);
    pub const M_ENTITY: StyleId = StyleId(11);
    pub const M_PI: StyleId = StyleId(12);
    pub const M_CDATA: StyleId = StyleId(13);
    pub const M_COMMENT: StyleId = StyleId(14);

    pub const CSS_DEFAULT: StyleId = StyleId(15);
    pub const CSS_COMMENT: StyleId = StyleId(16);
    pub const CSS_NUMBER: StyleId = StyleId(17);
    pub const CSS_STRING: StyleId = StyleId(18);
    pub const CSS_WORD: StyleId = StyleId(19);
    pub const CSS_IDENTIFIER: StyleId = StyleId(20);
    pub const CSS_OPERATOR: StyleId = StyleId(21);

    pub const CSL_DEFAULT: StyleId = StyleId(22);
    pub const CSL_COMMENT: StyleId = StyleId(23);
    pub const CSL_COMMENTBLOCK: StyleId = StyleId(24);
    pub const CSL_NUMBER: StyleId = StyleId(25);
    pub const CSL_STRING: StyleId = StyleId(26);
    pub const CSL_WORD: StyleId = StyleId(27);
    pub const CSL_IDENTIFIER: StyleId = StyleId(28);
    pub const CSL_OPERATOR: StyleId = StyleId(29);
    pub const CSL_REGEX: StyleId = StyleId(30);

    pub const SSL_DEFAULT: StyleId = StyleId(31);
    pub const SSL_COMMENT: StyleId = StyleId(32);
    pub const SSL_COMMENTBLOCK: StyleId = StyleId(33);
    pub const SSL_NUMBER: StyleId = StyleId(34);
    pub const SSL_STRING: StyleId = StyleId(35);
    pub const SSL_WORD: StyleId = StyleId(36);
    pub const SSL_IDENTIFIER: StyleId = StyleId(37);
    pub const SSL_OPERATOR: StyleId = StyleId(38);
    pub const SSL_REGEX: StyleId = StyleId(39);
    pub const SSL_VARIABLE: StyleId = StyleId(40);

    pub const TPL_DEFAULT: StyleId = StyleId(41);
    pub const TPL_COMMENT: StyleId = StyleId(42);
    pub const TPL_COMMENTBLOCK: StyleId = StyleId(43);
    pub const TPL_NUMBER: StyleId = StyleId(44);
    pub const TPL_STRING: StyleId = StyleId(45);
    pub const TPL_WORD: StyleId = StyleId(46);
    pub const TPL_IDENTIFIER: StyleId = StyleId(47);
    pub const TPL_OPERATOR: StyleId = StyleId(48);
    pub const TPL_VARIABLE: StyleId = StyleId(49);
    pub const TPL_REGEX: StyleId = StyleId(50);
    pub const TPL_UPPER_BOUND: StyleId = StyleId(56);
}

/// One of the five sub-language families of a UDL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// Markup (HTML, XML).
    Markup,
    /// Style sheets.
    Css,
    /// Client-side language (usually JavaScript).
    Csl,
    /// Server-side language (PHP, Python, Ruby, ...).
    Ssl,
    /// Template language.
    Tpl,
}

impl Family {
    /// All families, in style-range order.
    pub const ALL: [Family; 5] = [
        Family::Markup,
        Family::Css,
        Family::Csl,
        Family::Ssl,
        Family::Tpl,
    ];

    /// Returns the closed style range owned by this family.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<u8> {
        match self {
            Self::Markup => styles::M_DEFAULT.0..=styles::M_COMMENT.0,
            Self::Css => styles::CSS_DEFAULT.0..=styles::CSS_OPERATOR.0,
            Self::Csl => styles::CSL_DEFAULT.0..=styles::CSL_REGEX.0,
            Self::Ssl => styles::SSL_DEFAULT.0..=styles::SSL_VARIABLE.0,
            Self::Tpl => styles::TPL_DEFAULT.0..=styles::TPL_UPPER_BOUND.0,
        }
    }

    /// Returns the default (whitespace) style of this family.
    #[must_use]
    pub const fn default_style(self) -> StyleId {
        match self {
            Self::Markup => styles::M_DEFAULT,
            Self::Css => styles::CSS_DEFAULT,
            Self::Csl => styles::CSL_DEFAULT,
            Self::Ssl => styles::SSL_DEFAULT,
            Self::Tpl => styles::TPL_DEFAULT,
        }
    }

    /// Short tag used in configuration and diagnostics ("M", "CSS", ...).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Markup => "M",
            Self::Css => "CSS",
            Self::Csl => "CSL",
            Self::Ssl => "SSL",
            Self::Tpl => "TPL",
        }
    }

    /// Parses a family tag, accepting either the short tag or the full name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "M" | "MARKUP" => Some(Self::Markup),
            "CSS" => Some(Self::Css),
            "CSL" => Some(Self::Csl),
            "SSL" => Some(Self::Ssl),
            "TPL" => Some(Self::Tpl),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Markup => 0,
            Self::Css => 1,
            Self::Csl => 2,
            Self::Ssl => 3,
            Self::Tpl => 4,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Maps a style id to the family that owns it.
///
/// # Errors
///
/// Returns [`LangError::UnknownStyle`] if the id lies outside every family
/// range. A correctly configured lexer never produces such ids.
pub fn classify(style: StyleId) -> Result<Family, LangError> {
    Family::ALL
        .into_iter()
        .find(|family| family.range().contains(&style.0))
        .ok_or(LangError::UnknownStyle { style })
}

/// Returns true if `style` is the default style of any family.
#[must_use]
pub fn is_default_style(style: StyleId) -> bool {
    Family::ALL
        .iter()
        .any(|family| family.default_style() == style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_in_a_range_classifies_to_its_family() {
        for family in Family::ALL {
            for id in family.range() {
                assert_eq!(classify(StyleId(id)), Ok(family), "style {id}");
            }
        }
    }

    #[test]
    fn ranges_are_disjoint_and_contiguous() {
        let mut expected_start = 0u8;
        for family in Family::ALL {
            let range = family.range();
            assert_eq!(*range.start(), expected_start, "{family} starts late");
            assert_eq!(family.default_style().0, *range.start());
            expected_start = range.end() + 1;
        }
    }

    #[test]
    fn ids_past_the_last_range_are_rejected() {
        let err = classify(StyleId(57)).unwrap_err();
        assert_eq!(
            err,
            LangError::UnknownStyle {
                style: StyleId(57)
            }
        );
        assert!(classify(StyleId(255)).is_err());
    }

    #[test]
    fn default_styles_are_recognized() {
        assert!(is_default_style(styles::CSL_DEFAULT));
        assert!(is_default_style(styles::TPL_DEFAULT));
        assert!(!is_default_style(styles::M_TAGNAME));
        assert!(!is_default_style(styles::SSL_OPERATOR));
    }

    #[test]
    fn tags_round_trip() {
        for family in Family::ALL {
            assert_eq!(Family::from_tag(family.tag()), Some(family));
        }
        assert_eq!(Family::from_tag("markup"), Some(Family::Markup));
        assert_eq!(Family::from_tag("xyz"), None);
    }
}
