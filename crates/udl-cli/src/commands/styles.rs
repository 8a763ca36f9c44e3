//! Styles command implementation.

use udl::lang::{winner, Family, LookupType, Side};

/// Runs the styles command.
pub fn run() {
    println!("Style families:\n");
    println!("{:<8} {:<10} Default", "Family", "Range");
    println!("{}", "-".repeat(30));
    for family in Family::ALL {
        let range = family.range();
        println!(
            "{:<8} {:<10} {}",
            family.tag(),
            format!("{}..={}", range.start(), range.end()),
            family.default_style()
        );
    }

    println!("\nIndent boundary owner (row: left family, column: right family):\n");
    for line in indent_table() {
        println!("{line}");
    }
}

fn indent_table() -> Vec<String> {
    let mut header = format!("{:<6}", "");
    for right in Family::ALL {
        header.push_str(&format!("{:<6}", right.tag()));
    }
    let mut lines = vec![header.trim_end().to_string()];

    for left in Family::ALL {
        let mut row = format!("{:<6}", left.tag());
        for right in Family::ALL {
            row.push_str(&format!("{:<6}", cell(left, right)));
        }
        lines.push(row.trim_end().to_string());
    }
    lines
}

fn cell(left: Family, right: Family) -> &'static str {
    if left == right {
        return "-";
    }
    match winner(LookupType::Indent, left, right) {
        Side::Left => left.tag(),
        Side::Right => right.tag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_table_shows_owners() {
        insta::assert_snapshot!(indent_table().join("\n"), @r"
              M     CSS   CSL   SSL   TPL
        M     -     CSS   CSL   SSL   TPL
        CSS   M     -     CSL   SSL   TPL
        CSL   M     CSS   -     SSL   TPL
        SSL   SSL   SSL   SSL   -     SSL
        TPL   TPL   TPL   TPL   TPL   -
        ");
    }
}
