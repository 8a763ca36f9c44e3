//! List linters command implementation.

use udl::linters::all_linters;

/// Runs the list-linters command.
pub fn run() {
    println!("Available linters:\n");
    println!("{:<10} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for linter in all_linters() {
        println!(
            "{:<10} {:<22} {}",
            linter.code(),
            linter.name(),
            linter.description()
        );
    }

    println!("\nContent checks (always on):");
    println!("  encoding   - characters the declared encoding cannot represent");
    println!("  mixed-eol  - line terminators that differ from the expected EOL");

    println!("\nPresets:");
    println!("  recommended  - UL001, UL003, UL004 (default)");
    println!("  strict       - All linters with stricter settings");
    println!("  minimal      - UL004 only (for gradual adoption)");

    println!("\nAssign linters per language in udl.toml, e.g.:");
    println!("  [languages.Python]");
    println!("  extensions = [\"py\"]");
    println!("  linters = [\"line-length\", \"trailing-whitespace\"]");
}
