//! Linter registry and per-language linter resolution.

use crate::aggregator::GenericLinterAggregator;
use crate::error::LintError;
use crate::linter::LinterRef;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Lookup of terminal linters by language.
pub trait LinterRegistry: Send + Sync {
    /// Ids of the terminal linters registered for `language`, in order.
    fn linter_ids(&self, language: &str) -> Vec<String>;

    /// Instantiates the linter registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::UnknownLinter`] if no linter has that id.
    fn create_linter(&self, id: &str) -> Result<LinterRef, LintError>;
}

/// Resolves the linter to run for `language`.
///
/// One registered linter is returned as is. Several are wrapped in a
/// [`GenericLinterAggregator`]. Returns `None` when nothing is registered
/// or the single linter cannot be created.
#[must_use]
pub fn linter_for_language(
    registry: &Arc<dyn LinterRegistry>,
    language: &str,
) -> Option<LinterRef> {
    let ids = registry.linter_ids(language);
    match ids.as_slice() {
        [] => None,
        [id] => match registry.create_linter(id) {
            Ok(linter) => Some(linter),
            Err(e) => {
                warn!(language, linter = %id, error = %e, "cannot create linter");
                None
            }
        },
        _ => Some(Arc::new(GenericLinterAggregator::new(
            language,
            Arc::clone(registry),
        ))),
    }
}

/// A registry holding shared linter instances.
#[derive(Default)]
pub struct InMemoryLinterRegistry {
    linters: HashMap<String, LinterRef>,
    languages: HashMap<String, Vec<String>>,
}

impl InMemoryLinterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `linter` under its own name.
    pub fn register(&mut self, linter: LinterRef) {
        self.linters.insert(linter.name().to_string(), linter);
    }

    /// Adds linter `id` to the linters of `language`.
    pub fn assign(&mut self, language: impl Into<String>, id: impl Into<String>) {
        let ids = self.languages.entry(language.into()).or_default();
        let id = id.into();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, linter: LinterRef) -> Self {
        self.register(linter);
        self
    }

    /// Builder form of [`assign`](Self::assign).
    #[must_use]
    pub fn with_language<I, S>(mut self, language: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.assign(language, id);
        }
        self
    }

    /// Registered linter ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.linters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Languages with at least one linter, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Looks up a registered linter by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LinterRef> {
        self.linters.get(id)
    }
}

impl LinterRegistry for InMemoryLinterRegistry {
    fn linter_ids(&self, language: &str) -> Vec<String> {
        self.languages.get(language).cloned().unwrap_or_default()
    }

    fn create_linter(&self, id: &str) -> Result<LinterRef, LintError> {
        self.linters
            .get(id)
            .cloned()
            .ok_or_else(|| LintError::UnknownLinter { id: id.to_string() })
    }
}
