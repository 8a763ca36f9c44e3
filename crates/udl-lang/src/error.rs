//! Errors raised while resolving style ownership.

use crate::family::StyleId;
use thiserror::Error;

/// Errors that can occur while classifying styles or resolving sub-languages.
///
/// All variants describe setup mistakes (a lexer emitting styles outside the
/// known ranges, a descriptor naming an unregistered language). They are
/// propagated to the caller rather than defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangError {
    /// The style id lies outside every family range.
    #[error("style {style} does not belong to any UDL family")]
    UnknownStyle {
        /// The offending style id.
        style: StyleId,
    },

    /// A buffer position past the end of the document was requested.
    #[error("position {pos} is out of range for a buffer of length {len}")]
    PositionOutOfRange {
        /// Requested position.
        pos: usize,
        /// Buffer length in bytes.
        len: usize,
    },

    /// The language registry has no service for this name.
    #[error("no language service registered for `{name}`")]
    UnknownLanguage {
        /// Language name that failed to resolve.
        name: String,
    },
}
