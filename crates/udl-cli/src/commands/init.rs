//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# udl configuration

# Linter preset: recommended, strict or minimal
preset = "recommended"

[lint]
# Report lines whose terminator differs from `eol`
mixed_eols = true
# Expected line terminator: "lf", "crlf" or "cr"
eol = "lf"
# Declared document encoding: any WHATWG label, e.g. utf-8, ascii or windows-1252
encoding = "utf-8"

# Languages map file extensions to linters.
# A language without `linters` uses the preset.
# Set `generic_linter = false` to only run the encoding and EOL checks.

[languages.HTML]
extensions = ["html", "htm"]

[languages.Python]
extensions = ["py"]
linters = ["trailing-whitespace", "line-length", "unbalanced-brackets"]

# [languages.Perl]
# extensions = ["pl", "pm"]
# generic_linter = false

# Linter configurations

[linters.line-length]
enabled = true
# severity = "error"  # Override default severity
max_length = 120

# [linters.mixed-indentation]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("udl.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created udl.toml");
    println!("\nNext steps:");
    println!("  1. Edit udl.toml to map extensions to languages");
    println!("  2. Run: udl lint");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use udl::{Config, EolMode};

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).expect("valid toml");
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.lint.eol, EolMode::Lf);
        assert_eq!(config.language_for_extension("py"), Some("Python"));
        assert_eq!(config.language_for_extension("htm"), Some("HTML"));
        assert!(config.is_linter_enabled("line-length"));
        let line_length = config.linters.get("line-length").expect("configured");
        assert_eq!(line_length.get_int("max_length", 0), 120);
    }
}
