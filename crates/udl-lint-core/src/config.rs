//! Configuration and preference lookup.

use crate::checks::eol::EolMode;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Preference keys consulted by the lint worker.
pub mod keys {
    /// Whether to report lines with unexpected line terminators.
    pub const LINT_MIXED_EOLS: &str = "lintMixedEOLs";
    /// Expected line terminator (`lf`, `crlf` or `cr`).
    pub const END_OF_LINE: &str = "endOfLine";
    /// Prefix of the per-language generic linter opt-out.
    pub const GENERIC_LINTER_PREFIX: &str = "genericLinter:";

    /// Key of the generic linter opt-out for `language`.
    #[must_use]
    pub fn generic_linter(language: &str) -> String {
        format!("{GENERIC_LINTER_PREFIX}{language}")
    }
}

/// Read-only preference store.
pub trait Preferences: Send + Sync {
    /// Boolean preference, if set.
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// String preference, if set.
    fn get_string(&self, key: &str) -> Option<String>;
}

/// A preference value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    /// Boolean value.
    Bool(bool),
    /// String value.
    String(String),
}

/// Preferences held in a map.
#[derive(Debug, Clone, Default)]
pub struct MapPreferences {
    values: HashMap<String, PrefValue>,
}

impl MapPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a boolean preference.
    #[must_use]
    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.values.insert(key.into(), PrefValue::Bool(value));
        self
    }

    /// Sets a string preference.
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(key.into(), PrefValue::String(value.into()));
        self
    }
}

impl Preferences for MapPreferences {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            PrefValue::Bool(b) => Some(*b),
            PrefValue::String(_) => None,
        }
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            PrefValue::String(s) => Some(s.clone()),
            PrefValue::Bool(_) => None,
        }
    }
}

/// Top-level configuration for udl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use when a language lists no linters
    /// (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Worker-level settings.
    #[serde(default)]
    pub lint: LintSettings,

    /// Per-language settings, keyed by language name.
    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,

    /// Per-linter configurations, keyed by linter name.
    #[serde(default)]
    pub linters: HashMap<String, LinterConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a linter is enabled.
    #[must_use]
    pub fn is_linter_enabled(&self, name: &str) -> bool {
        self.linters
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a linter.
    #[must_use]
    pub fn linter_severity(&self, name: &str) -> Option<Severity> {
        self.linters.get(name).and_then(|c| c.severity)
    }

    /// Finds the language whose extensions include `extension`.
    #[must_use]
    pub fn language_for_extension(&self, extension: &str) -> Option<&str> {
        let mut names: Vec<&String> = self.languages.keys().collect();
        names.sort();
        names.into_iter().map(String::as_str).find(|name| {
            self.languages[*name]
                .extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
        })
    }
}

impl Preferences for Config {
    fn get_bool(&self, key: &str) -> Option<bool> {
        if key == keys::LINT_MIXED_EOLS {
            return Some(self.lint.mixed_eols);
        }
        let language = key.strip_prefix(keys::GENERIC_LINTER_PREFIX)?;
        self.languages.get(language)?.generic_linter
    }

    fn get_string(&self, key: &str) -> Option<String> {
        match key {
            keys::END_OF_LINE => Some(self.lint.eol.name().to_string()),
            _ => None,
        }
    }
}

/// Lint worker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSettings {
    /// Report lines whose terminator differs from `eol`.
    #[serde(default = "default_true")]
    pub mixed_eols: bool,

    /// Expected line terminator.
    #[serde(default)]
    pub eol: EolMode,

    /// Default document encoding.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            mixed_eols: true,
            eol: EolMode::default(),
            encoding: default_encoding(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

/// Per-language configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Set to `false` to opt this language out of linting unless forced.
    #[serde(default)]
    pub generic_linter: Option<bool>,

    /// Terminal linter ids registered for this language.
    #[serde(default)]
    pub linters: Vec<String>,

    /// File extensions mapped to this language.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Per-linter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Whether this linter is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this linter.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Linter-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl LinterConfig {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.lint.mixed_eols);
        assert_eq!(config.lint.eol, EolMode::Lf);
        assert_eq!(config.lint.encoding, "utf-8");
        assert!(config.linters.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"

[lint]
mixed_eols = false
eol = "crlf"

[languages.Python]
generic_linter = false
linters = ["trailing-whitespace", "line-length"]
extensions = ["py", ".pyw"]

[linters.line-length]
severity = "error"
max_length = 100
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.lint.eol, EolMode::CrLf);
        assert_eq!(config.lint.encoding, "utf-8");
        assert_eq!(config.linter_severity("line-length"), Some(Severity::Error));
        assert!(config.is_linter_enabled("line-length"));
        assert_eq!(config.linters["line-length"].get_int("max_length", 120), 100);
        assert_eq!(config.language_for_extension("pyw"), Some("Python"));
        assert_eq!(config.language_for_extension("rs"), None);
    }

    #[test]
    fn config_answers_preference_keys() {
        let config = Config::parse(
            r#"
[lint]
mixed_eols = false
eol = "cr"

[languages.Perl]
generic_linter = false
"#,
        )
        .expect("Failed to parse");

        assert_eq!(config.get_bool(keys::LINT_MIXED_EOLS), Some(false));
        assert_eq!(config.get_string(keys::END_OF_LINE).as_deref(), Some("cr"));
        assert_eq!(config.get_bool(&keys::generic_linter("Perl")), Some(false));
        assert_eq!(config.get_bool(&keys::generic_linter("Ruby")), None);
        assert_eq!(config.get_bool("unknown"), None);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::parse("[lint\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn map_preferences_are_typed() {
        let prefs = MapPreferences::new()
            .with_bool(keys::LINT_MIXED_EOLS, true)
            .with_string(keys::END_OF_LINE, "crlf");
        assert_eq!(prefs.get_bool(keys::LINT_MIXED_EOLS), Some(true));
        assert_eq!(prefs.get_string(keys::LINT_MIXED_EOLS), None);
        assert_eq!(prefs.get_string(keys::END_OF_LINE).as_deref(), Some("crlf"));
    }
}
