//! Linter presets for common configurations.

use crate::{LineLength, MixedIndentation, TrailingWhitespace, UnbalancedBrackets};
use std::sync::Arc;
use udl_lint_core::{LinterRef, Severity};

/// Preset configurations for udl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended linters with sensible defaults.
    Recommended,
    /// Every linter, with tighter limits.
    Strict,
    /// Only bracket balance, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the linters for this preset.
    #[must_use]
    pub fn linters(self) -> Vec<LinterRef> {
        match self {
            Self::Recommended => recommended_linters(),
            Self::Strict => strict_linters(),
            Self::Minimal => minimal_linters(),
        }
    }

    /// Preset name as written in configuration.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!(
                "unknown preset `{other}`. Valid values: recommended, strict, minimal"
            )),
        }
    }
}

/// Returns the recommended set of linters.
///
/// Includes:
/// - `trailing-whitespace` (UL001)
/// - `mixed-indentation` (UL003)
/// - `unbalanced-brackets` (UL004)
#[must_use]
pub fn recommended_linters() -> Vec<LinterRef> {
    vec![
        Arc::new(TrailingWhitespace::new()),
        Arc::new(MixedIndentation::new()),
        Arc::new(UnbalancedBrackets::new()),
    ]
}

/// Returns the strict set of linters.
///
/// Includes all recommended linters plus `line-length` (UL002) capped at
/// 100 characters, and reports trailing whitespace as an error.
#[must_use]
pub fn strict_linters() -> Vec<LinterRef> {
    vec![
        Arc::new(TrailingWhitespace::new().severity(Severity::Error)),
        Arc::new(LineLength::new().max_length(100)),
        Arc::new(MixedIndentation::new()),
        Arc::new(UnbalancedBrackets::new()),
    ]
}

/// Returns the minimal set of linters.
#[must_use]
pub fn minimal_linters() -> Vec<LinterRef> {
    vec![Arc::new(UnbalancedBrackets::new())]
}

/// Returns all available linters with default settings.
#[must_use]
pub fn all_linters() -> Vec<LinterRef> {
    vec![
        Arc::new(TrailingWhitespace::new()),
        Arc::new(LineLength::new()),
        Arc::new(MixedIndentation::new()),
        Arc::new(UnbalancedBrackets::new()),
    ]
}
