//! Classify command implementation.

use anyhow::{Context, Result};
use udl::lang::{classify, is_default_style, StyleId};

/// Runs the classify command.
pub fn run(style: u8) -> Result<()> {
    println!("{}", describe(StyleId::from(style))?);
    Ok(())
}

fn describe(style: StyleId) -> Result<String> {
    let family = classify(style).context("Style id outside every family range")?;
    let range = family.range();
    let mut line = format!(
        "style {style}: {family} ({}..={})",
        range.start(),
        range.end()
    );
    if is_default_style(style) {
        line.push_str(", default style");
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use udl::lang::styles;

    #[test]
    fn names_family_and_range() {
        assert_eq!(
            describe(styles::CSL_DEFAULT).expect("known"),
            "style 22: CSL (22..=30), default style"
        );
        assert_eq!(
            describe(styles::SSL_VARIABLE).expect("known"),
            "style 40: SSL (31..=40)"
        );
    }

    #[test]
    fn unknown_style_is_an_error() {
        let err = describe(StyleId(57)).expect_err("out of range");
        assert!(err.to_string().contains("outside every family range"));
    }
}
