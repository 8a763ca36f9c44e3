//! Lint command implementation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use udl::{Encoding, EolMode, LintSession};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// How long to wait for the worker to report every file.
const COLLECT_TIMEOUT: Duration = Duration::from_secs(120);

/// How long to wait for the worker to exit after the last report.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Command-line overrides for a lint run.
pub struct LintOptions {
    /// Language for every file, bypassing extension mapping.
    pub language: Option<String>,
    pub format: OutputFormat,
    pub encoding: Option<String>,
    pub eol: Option<EolMode>,
    /// Mark every request as forced.
    pub force: bool,
}

/// Runs the lint command.
pub fn run(paths: &[PathBuf], options: &LintOptions, source: &ConfigSource) -> Result<()> {
    let mut config = source.load()?;
    if let Some(encoding) = &options.encoding {
        config.lint.encoding.clone_from(encoding);
    }
    if let Some(eol) = options.eol {
        config.lint.eol = eol;
    }

    // An unknown name is reported per file by the worker
    let declared = Encoding::from_name(&config.lint.encoding).ok();

    let files = discover_files(paths)?;
    tracing::info!("Linting {} file(s)", files.len());

    let mut session = LintSession::start(config).context("Failed to start lint service")?;
    for path in &files {
        let Some(content) = read_document(path, declared)? else {
            tracing::debug!("Skipping binary file {}", path.display());
            continue;
        };
        let mut request = session.request_for(path, content);
        if let Some(language) = &options.language {
            request.language.clone_from(language);
        }
        if options.force {
            request = request.forced();
        }
        session.submit(request).context("Lint service stopped")?;
    }

    let mut done = session.collect(COLLECT_TIMEOUT);
    done.sort_by(|a, b| a.uid.cmp(&b.uid));
    let missing = session.outstanding().to_vec();
    for uid in &missing {
        tracing::warn!("No lint result for {} within {:?}", uid, COLLECT_TIMEOUT);
    }
    if !session.finish(SHUTDOWN_TIMEOUT) {
        tracing::warn!("Lint worker did not exit within {:?}", SHUTDOWN_TIMEOUT);
    }

    super::output::print(&done, options.format)?;

    if !missing.is_empty() || done.iter().any(|r| r.failed() || r.results.has_errors()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Reads `path` as text.
///
/// UTF-8 is tried first, then the declared encoding; anything else is
/// decoded lossily. Returns `None` for files containing NUL bytes.
fn read_document(path: &Path, declared: Option<Encoding>) -> Result<Option<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.contains(&0) {
        return Ok(None);
    }
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(err) => {
            let bytes = err.into_bytes();
            if let Some(text) = declared.and_then(|enc| enc.decode(&bytes)) {
                return Ok(Some(text));
            }
            tracing::warn!(
                "{} is not valid text in the declared encoding; replacing invalid bytes",
                path.display()
            );
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
    }
}

fn discover_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(true).git_ignore(true);

        for entry in builder.build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if entry.file_type().is_some_and(|t| t.is_file()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
