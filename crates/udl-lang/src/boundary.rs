//! Boundary resolution between adjacent families.
//!
//! The lexer styles a transition point (`<script>|`, `?>|`) with the
//! *receiving* family's default style. Only positions sitting on a default
//! style are ambiguous; for those the style to the left is inspected and
//! the feud table decides which family governs the position.

use crate::buffer::EditorBuffer;
use crate::error::LangError;
use crate::family::{classify, is_default_style, Family, StyleId};
use crate::feud::{winner, LookupType, Side};

/// Returns the style that governs `pos` for indentation purposes.
///
/// # Errors
///
/// Returns [`LangError::UnknownStyle`] if either neighbouring style is
/// outside every family range.
pub fn meaningful_style_at(buf: &dyn EditorBuffer, pos: usize) -> Result<StyleId, LangError> {
    let right = buf.style_at(pos);
    if pos == 0 || !is_default_style(right) {
        return Ok(right);
    }

    let left = buf.style_at(buf.position_before(pos));
    if left == right {
        return Ok(right);
    }

    let left_family = classify(left)?;
    let right_family = classify(right)?;
    if left_family == right_family {
        return Ok(right);
    }

    match winner(LookupType::Indent, left_family, right_family) {
        Side::Left => Ok(left),
        Side::Right => Ok(right),
    }
}

/// Returns the family that governs `pos` for indentation purposes.
///
/// # Errors
///
/// See [`meaningful_style_at`].
pub fn meaningful_family_at(buf: &dyn EditorBuffer, pos: usize) -> Result<Family, LangError> {
    classify(meaningful_style_at(buf, pos)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::StyledBuffer;
    use crate::family::styles::*;

    fn pair(left: StyleId, right: StyleId) -> StyledBuffer {
        StyledBuffer::new().push("a", left).push(" ", right)
    }

    #[test]
    fn non_default_style_is_returned_unchanged() {
        let buf = pair(SSL_OPERATOR, M_STAGO);
        assert_eq!(meaningful_style_at(&buf, 1), Ok(M_STAGO));
    }

    #[test]
    fn position_zero_is_never_resolved_leftwards() {
        let buf = StyledBuffer::new().push(" ", CSL_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 0), Ok(CSL_DEFAULT));
    }

    #[test]
    fn same_family_keeps_the_right_style() {
        let buf = pair(CSL_OPERATOR, CSL_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 1), Ok(CSL_DEFAULT));
    }

    #[test]
    fn css_yields_to_markup() {
        let buf = pair(CSS_OPERATOR, M_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 1), Ok(M_DEFAULT));
    }

    #[test]
    fn client_script_yields_to_every_family() {
        for right in [M_DEFAULT, CSS_DEFAULT, SSL_DEFAULT, TPL_DEFAULT] {
            let buf = pair(CSL_IDENTIFIER, right);
            assert_eq!(meaningful_style_at(&buf, 1), Ok(right));
        }
    }

    #[test]
    fn template_code_keeps_control_of_the_boundary() {
        let buf = pair(TPL_IDENTIFIER, M_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 1), Ok(TPL_IDENTIFIER));
        assert_eq!(meaningful_family_at(&buf, 1), Ok(Family::Tpl));
    }

    #[test]
    fn server_code_keeps_control_of_the_boundary() {
        for right in [M_DEFAULT, CSS_DEFAULT, CSL_DEFAULT, TPL_DEFAULT] {
            let buf = pair(SSL_OPERATOR, right);
            assert_eq!(meaningful_style_at(&buf, 1), Ok(SSL_OPERATOR));
        }
    }

    #[test]
    fn markup_hands_the_position_to_the_right() {
        let buf = pair(M_STAGC, CSL_DEFAULT);
        assert_eq!(meaningful_family_at(&buf, 1), Ok(Family::Csl));
    }

    #[test]
    fn newline_after_script_tag_belongs_to_the_script() {
        let buf = StyledBuffer::new()
            .push("<script>", M_TAGNAME)
            .push("\n", CSL_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 8), Ok(CSL_DEFAULT));
        assert_eq!(meaningful_family_at(&buf, 8), Ok(Family::Csl));

        let unterminated = StyledBuffer::new().push("<script>", M_TAGNAME);
        assert_eq!(meaningful_style_at(&unterminated, 8), Ok(M_TAGNAME));
        assert_eq!(meaningful_family_at(&unterminated, 8), Ok(Family::Markup));
    }

    #[test]
    fn newline_after_server_close_tag_stays_with_server_code() {
        let buf = StyledBuffer::new()
            .push("<?php x ?>", SSL_OPERATOR)
            .push("\n", M_DEFAULT);
        assert_eq!(meaningful_style_at(&buf, 10), Ok(SSL_OPERATOR));

        let unterminated = StyledBuffer::new().push("<?php x ?>", SSL_OPERATOR);
        assert_eq!(meaningful_style_at(&unterminated, 10), Ok(SSL_OPERATOR));
    }

    #[test]
    fn unknown_left_style_is_an_error() {
        let buf = pair(StyleId(99), SSL_DEFAULT);
        assert!(matches!(
            meaningful_style_at(&buf, 1),
            Err(LangError::UnknownStyle { .. })
        ));
    }
}
