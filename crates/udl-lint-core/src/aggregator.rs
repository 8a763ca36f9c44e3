//! Runs every terminal linter of a language and merges their findings.

use crate::error::LintError;
use crate::linter::{guarded, Linter};
use crate::registry::LinterRegistry;
use crate::request::LintRequest;
use crate::types::LintResults;
use std::sync::Arc;
use tracing::{debug, warn};

/// A linter that fans out to all terminal linters registered for one
/// language.
///
/// The kept result set is always the largest seen so far; every other set
/// is appended to it without de-duplication. A failing linter is logged and
/// contributes nothing.
pub struct GenericLinterAggregator {
    language: String,
    registry: Arc<dyn LinterRegistry>,
}

impl GenericLinterAggregator {
    /// Name reported by [`Linter::name`].
    pub const NAME: &'static str = "generic-aggregator";

    /// Creates an aggregator for `language`.
    #[must_use]
    pub fn new(language: impl Into<String>, registry: Arc<dyn LinterRegistry>) -> Self {
        Self {
            language: language.into(),
            registry,
        }
    }

    /// The aggregated language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Linter for GenericLinterAggregator {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Runs every linter registered for the language"
    }

    fn lint_with_text(
        &self,
        request: &LintRequest,
        text: &str,
    ) -> Result<LintResults, LintError> {
        let mut kept: Option<LintResults> = None;

        for id in self.registry.linter_ids(&self.language) {
            let outcome = self
                .registry
                .create_linter(&id)
                .and_then(|linter| guarded(&id, || linter.lint_with_text(request, text)));

            let mut results = match outcome {
                Ok(results) => results,
                Err(e) => {
                    warn!(uid = %request.uid, linter = %id, error = %e, "linter failed; skipping");
                    continue;
                }
            };
            debug!(uid = %request.uid, linter = %id, count = results.len(), "linter finished");

            match kept.as_mut() {
                None => kept = Some(results),
                Some(current) => {
                    if results.len() > current.len() {
                        std::mem::swap(current, &mut results);
                    }
                    current.merge_from(results);
                }
            }
        }

        Ok(kept.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryLinterRegistry;
    use crate::types::{LintResult, Severity};

    struct Fixed {
        name: &'static str,
        lines: Vec<usize>,
    }

    impl Linter for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn lint_with_text(&self, _: &LintRequest, _: &str) -> Result<LintResults, LintError> {
            Ok(self
                .lines
                .iter()
                .map(|&l| LintResult::new(Severity::Warning, l, 1, 2, self.name))
                .collect())
        }
    }

    struct Failing;

    impl Linter for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn lint_with_text(&self, _: &LintRequest, _: &str) -> Result<LintResults, LintError> {
            Err(LintError::Linter {
                linter: "failing".into(),
                message: "no interpreter".into(),
            })
        }
    }

    fn aggregate(ids: &[&str]) -> LintResults {
        let registry = InMemoryLinterRegistry::new()
            .with(Arc::new(Fixed {
                name: "small",
                lines: vec![1],
            }))
            .with(Arc::new(Fixed {
                name: "large",
                lines: vec![2, 3, 4],
            }))
            .with(Arc::new(Failing))
            .with_language("Text", ids.iter().copied());
        let agg = GenericLinterAggregator::new("Text", Arc::new(registry));
        agg.lint(&LintRequest::new("u", "Text", ""))
            .expect("aggregation never fails")
    }

    fn sources(results: &LintResults) -> Vec<&str> {
        results.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn larger_set_becomes_the_base() {
        let results = aggregate(&["small", "large"]);
        assert_eq!(sources(&results), vec!["large", "large", "large", "small"]);
    }

    #[test]
    fn smaller_later_set_is_appended() {
        let results = aggregate(&["large", "small"]);
        assert_eq!(sources(&results), vec!["large", "large", "large", "small"]);
    }

    #[test]
    fn failures_and_unknown_ids_contribute_nothing() {
        let results = aggregate(&["failing", "missing", "small"]);
        assert_eq!(sources(&results), vec!["small"]);
    }

    #[test]
    fn no_linters_gives_empty_results() {
        assert!(aggregate(&[]).is_empty());
    }
}
