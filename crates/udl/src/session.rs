//! A lint service wired to the built-in linters and a project config.

use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use udl_lint_core::{
    ChannelDispatcher, Config, ConfigError, LintError, LintRequest, LintService, LinterRegistry,
    Preferences,
};
use udl_linters::{build_registry, DEFAULT_LANGUAGE};

/// Config file names to search for, in priority order.
pub const CONFIG_CANDIDATES: &[&str] = &["udl.toml", ".udl.toml"];

/// Finds the project config file in `root`.
#[must_use]
pub fn find_project_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Loads the project config in `root`, or the default config if none exists.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_project_config(root: &Path) -> Result<Config, ConfigError> {
    match find_project_config(root) {
        Some(path) => {
            debug!(path = %path.display(), "loading project config");
            Config::from_file(&path)
        }
        None => Ok(Config::default()),
    }
}

/// A running lint service plus the receiving end of its results.
///
/// Requests are linted by the built-in linters registered from the config;
/// the config also answers the worker's preference lookups.
pub struct LintSession {
    config: Arc<Config>,
    service: LintService,
    finished: mpsc::Receiver<LintRequest>,
    outstanding: Vec<String>,
}

impl LintSession {
    /// Starts a session for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start(config: Config) -> Result<Self, LintError> {
        let registry = Arc::new(build_registry(&config));
        Self::start_with_registry(config, registry)
    }

    /// Starts a session that resolves linters from `registry` instead of
    /// the built-in ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start_with_registry(
        config: Config,
        registry: Arc<dyn LinterRegistry>,
    ) -> Result<Self, LintError> {
        let config = Arc::new(config);
        let (dispatcher, finished) = ChannelDispatcher::new();
        let service = LintService::builder(dispatcher)
            .preferences(Arc::clone(&config) as Arc<dyn Preferences>)
            .registry(registry)
            .start()?;
        info!("lint session started");
        Ok(Self {
            config,
            service,
            finished,
            outstanding: Vec::new(),
        })
    }

    /// The session config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying service.
    #[must_use]
    pub fn service(&self) -> &LintService {
        &self.service
    }

    /// Language for `path`, from the configured extensions.
    #[must_use]
    pub fn language_for_path(&self, path: &Path) -> String {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.config.language_for_extension(ext))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string()
    }

    /// Builds a request for `content` read from `path`, using the
    /// configured default encoding and EOL.
    #[must_use]
    pub fn request_for(&self, path: &Path, content: String) -> LintRequest {
        let mut request = LintRequest::new(
            path.display().to_string(),
            self.language_for_path(path),
            content,
        )
        .with_path(path)
        .with_encoding(self.config.lint.encoding.clone())
        .with_eol(self.config.lint.eol);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            request = request.with_cwd(parent);
        }
        request
    }

    /// Queues a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is shutting down.
    pub fn submit(&mut self, request: LintRequest) -> Result<(), LintError> {
        let uid = request.uid.clone();
        self.service.add_request(request)?;
        self.outstanding.push(uid);
        Ok(())
    }

    /// Waits for every submitted request, giving up at `timeout`.
    ///
    /// Returns the finished requests in completion order. Requests still
    /// unreported at the deadline stay in [`outstanding`](Self::outstanding).
    pub fn collect(&mut self, timeout: Duration) -> Vec<LintRequest> {
        let deadline = Instant::now() + timeout;
        let mut done = Vec::with_capacity(self.outstanding.len());
        while !self.outstanding.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.finished.recv_timeout(remaining) {
                Ok(request) => {
                    if let Some(i) = self.outstanding.iter().position(|uid| *uid == request.uid) {
                        self.outstanding.remove(i);
                    }
                    done.push(request);
                }
                Err(_) => break,
            }
        }
        if !self.outstanding.is_empty() {
            debug!(missing = self.outstanding.len(), "collect timed out");
        }
        done
    }

    /// Uids of submitted requests that have not been collected yet.
    #[must_use]
    pub fn outstanding(&self) -> &[String] {
        &self.outstanding
    }

    /// Shuts the service down and waits up to `timeout` for the worker.
    pub fn finish(self, timeout: Duration) -> bool {
        self.service.shutdown_and_wait(timeout)
    }
}
