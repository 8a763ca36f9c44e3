//! Output formatting for finished lint requests.

use anyhow::Result;
use miette::{NamedSource, Report};
use serde::Serialize;
use udl::{LintDiagnostic, LintRequest, LintResults, Severity};

use crate::OutputFormat;

/// Print finished requests in the specified format.
pub fn print(done: &[LintRequest], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(done),
        OutputFormat::Json => return print_json(done),
        OutputFormat::Compact => {
            for line in compact_lines(done) {
                println!("{line}");
            }
        }
        OutputFormat::Fancy => print_fancy(done),
    }
    Ok(())
}

fn totals(done: &[LintRequest]) -> (usize, usize, usize) {
    done.iter()
        .map(|r| r.results.count_by_severity())
        .fold((0, 0, 0), |(e, w, i), (de, dw, di)| (e + de, w + dw, i + di))
}

fn print_summary(done: &[LintRequest]) {
    let (errors, warnings, infos) = totals(done);
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color,
        errors,
        warnings,
        infos,
        done.len()
    );
}

fn print_text(done: &[LintRequest]) {
    for request in done {
        if let Some(error) = &request.error {
            println!("{} ({})", request.uid, request.language);
            println!("  \x1b[31mfailed\x1b[0m: {error}");
            println!();
        }
        for result in &request.results {
            let severity_indicator = match result.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",
                Severity::Warning => "\x1b[33mwarning\x1b[0m",
                Severity::Info => "\x1b[34minfo\x1b[0m",
            };

            println!(
                "{} at {}:{}:{}",
                result.source, request.uid, result.line_start, result.col_start,
            );
            println!("  {}: {}", severity_indicator, result.description);
            println!();
        }
    }

    print_summary(done);
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    results: &'a LintResults,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    errors: usize,
    warnings: usize,
    infos: usize,
}

fn json_report(done: &[LintRequest]) -> JsonReport<'_> {
    let (errors, warnings, infos) = totals(done);
    JsonReport {
        files: done
            .iter()
            .map(|r| JsonFile {
                path: &r.uid,
                language: &r.language,
                error: r.error.as_deref(),
                results: &r.results,
            })
            .collect(),
        errors,
        warnings,
        infos,
    }
}

fn print_json(done: &[LintRequest]) -> Result<()> {
    let json = serde_json::to_string_pretty(&json_report(done))?;
    println!("{json}");
    Ok(())
}

fn compact_lines(done: &[LintRequest]) -> Vec<String> {
    let mut lines = Vec::new();
    for request in done {
        if let Some(error) = &request.error {
            lines.push(format!("{}: failed: {error}", request.uid));
        }
        for result in &request.results {
            lines.push(format!(
                "{}:{}:{}: {} [{}] {}",
                request.uid,
                result.line_start,
                result.col_start,
                result.severity,
                result.source,
                result.description,
            ));
        }
    }
    lines
}

fn print_fancy(done: &[LintRequest]) {
    for request in done {
        if let Some(error) = &request.error {
            println!("{}: failed: {error}", request.uid);
        }
        for result in &request.results {
            let report = Report::new(LintDiagnostic::new(result, &request.content))
                .with_source_code(NamedSource::new(&request.uid, request.content.clone()));
            println!("{report:?}");
        }
    }

    print_summary(done);
}
