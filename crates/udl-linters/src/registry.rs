//! Building a linter registry from configuration.

use crate::presets::Preset;
use crate::{line_length, mixed_indentation, trailing_whitespace, unbalanced_brackets};
use crate::{LineLength, MixedIndentation, TrailingWhitespace, UnbalancedBrackets};
use std::sync::Arc;
use tracing::{debug, warn};
use udl_lint_core::{Config, InMemoryLinterRegistry, LinterRef};

/// Language used for documents no configured language claims.
pub const DEFAULT_LANGUAGE: &str = "Text";

/// Ids of every built-in linter.
pub const LINTER_IDS: [&str; 4] = [
    trailing_whitespace::NAME,
    line_length::NAME,
    mixed_indentation::NAME,
    unbalanced_brackets::NAME,
];

/// Creates built-in linter `id` with the options and severity from `config`.
///
/// Returns `None` for unknown ids and disabled linters.
#[must_use]
pub fn linter_by_id(id: &str, config: &Config) -> Option<LinterRef> {
    if !config.is_linter_enabled(id) {
        return None;
    }
    let options = config.linters.get(id);
    let severity = config.linter_severity(id);

    let linter: LinterRef = match id {
        trailing_whitespace::NAME => {
            let mut l = TrailingWhitespace::new();
            if let Some(o) = options {
                l = l.include_blank_lines(o.get_bool("include_blank_lines", true));
            }
            if let Some(s) = severity {
                l = l.severity(s);
            }
            Arc::new(l)
        }
        line_length::NAME => {
            let mut l = LineLength::new();
            if let Some(o) = options {
                let default = i64::try_from(line_length::DEFAULT_MAX_LENGTH).unwrap_or(i64::MAX);
                let max = o.get_int("max_length", default);
                l = l.max_length(usize::try_from(max).unwrap_or(line_length::DEFAULT_MAX_LENGTH));
            }
            if let Some(s) = severity {
                l = l.severity(s);
            }
            Arc::new(l)
        }
        mixed_indentation::NAME => {
            let l = MixedIndentation::new();
            Arc::new(match severity {
                Some(s) => l.severity(s),
                None => l,
            })
        }
        unbalanced_brackets::NAME => {
            let l = UnbalancedBrackets::new();
            Arc::new(match severity {
                Some(s) => l.severity(s),
                None => l,
            })
        }
        _ => return None,
    };
    Some(linter)
}

/// The preset named in `config`, or [`Preset::Recommended`].
#[must_use]
pub fn configured_preset(config: &Config) -> Preset {
    match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => name.parse().unwrap_or_else(|e: String| {
            warn!(error = %e, "falling back to the recommended preset");
            Preset::Recommended
        }),
    }
}

/// Builds the registry of built-in linters described by `config`.
///
/// Every enabled linter is registered. A linter with its own
/// `[linters.<id>]` table is built from it; otherwise the preset's variant
/// is used when the preset includes it. Each configured language gets its
/// listed linters, or the preset's when it lists none, and
/// [`DEFAULT_LANGUAGE`] gets the preset unless configured.
#[must_use]
pub fn build_registry(config: &Config) -> InMemoryLinterRegistry {
    let preset = configured_preset(config);
    let preset_linters = preset.linters();
    let preset_ids: Vec<String> = preset_linters
        .iter()
        .map(|l| l.name().to_string())
        .filter(|id| config.is_linter_enabled(id))
        .collect();

    let mut registry = InMemoryLinterRegistry::new();
    for id in LINTER_IDS {
        let from_preset = preset_linters.iter().find(|l| l.name() == id);
        let linter = match (config.linters.contains_key(id), from_preset) {
            (false, Some(l)) if config.is_linter_enabled(id) => Some(Arc::clone(l)),
            _ => linter_by_id(id, config),
        };
        if let Some(linter) = linter {
            registry.register(linter);
        }
    }

    let mut languages: Vec<&String> = config.languages.keys().collect();
    languages.sort();
    for language in languages {
        let listed = &config.languages[language].linters;
        let ids = if listed.is_empty() { &preset_ids } else { listed };
        for id in ids {
            if registry.get(id).is_some() {
                registry.assign(language.as_str(), id.as_str());
            } else {
                warn!(language = %language, linter = %id, "skipping unknown or disabled linter");
            }
        }
    }
    if !config.languages.contains_key(DEFAULT_LANGUAGE) {
        for id in &preset_ids {
            registry.assign(DEFAULT_LANGUAGE, id.as_str());
        }
    }

    debug!(preset = preset.name(), linters = registry.ids().len(), "built linter registry");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use udl_lint_core::{LinterRegistry, Severity};

    #[test]
    fn test_unknown_and_disabled_ids() {
        let config = Config::parse("[linters.line-length]\nenabled = false\n").expect("parse");
        assert!(linter_by_id("line-length", &config).is_none());
        assert!(linter_by_id("no-such-linter", &config).is_none());
        assert!(linter_by_id("mixed-indentation", &config).is_some());
    }

    #[test]
    fn test_default_registry_uses_recommended_preset() {
        let registry = build_registry(&Config::default());
        assert_eq!(registry.ids().len(), LINTER_IDS.len());
        assert_eq!(
            registry.linter_ids(DEFAULT_LANGUAGE),
            vec![
                "trailing-whitespace".to_string(),
                "mixed-indentation".to_string(),
                "unbalanced-brackets".to_string(),
            ]
        );
    }

    #[test]
    fn test_languages_list_their_own_linters() {
        let config = Config::parse(
            r#"
preset = "minimal"

[languages.Python]
linters = ["line-length", "bogus"]

[languages.Perl]
"#,
        )
        .expect("parse");
        let registry = build_registry(&config);
        assert_eq!(registry.linter_ids("Python"), vec!["line-length".to_string()]);
        assert_eq!(
            registry.linter_ids("Perl"),
            vec!["unbalanced-brackets".to_string()]
        );
        assert_eq!(
            registry.linter_ids(DEFAULT_LANGUAGE),
            vec!["unbalanced-brackets".to_string()]
        );
    }

    #[test]
    fn test_linter_table_overrides_preset_variant() {
        let config = Config::parse(
            r#"
preset = "strict"

[linters.trailing-whitespace]
severity = "info"
"#,
        )
        .expect("parse");
        let registry = build_registry(&config);
        let linter = registry
            .create_linter("trailing-whitespace")
            .expect("registered");
        let results = linter
            .lint(&udl_lint_core::LintRequest::new("t", "Text", "a \n"))
            .expect("lint");
        assert_eq!(results.as_slice()[0].severity, Severity::Info);
    }
}
