//! Family to sub-language routing.

use crate::family::Family;
use crate::service::{LanguageRegistry, LanguageService};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

/// Concrete sub-language names of one composite language, per family.
///
/// An empty or missing name means the composite language handles that
/// family itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyLanguages {
    names: [Option<String>; 5],
}

impl FamilyLanguages {
    /// Creates a descriptor with no delegates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language for `family`.
    #[must_use]
    pub fn with(mut self, family: Family, language: impl Into<String>) -> Self {
        self.set(family, language);
        self
    }

    /// Sets the language for `family`.
    pub fn set(&mut self, family: Family, language: impl Into<String>) {
        let language = language.into();
        self.names[family.index()] = (!language.is_empty()).then_some(language);
    }

    /// Language name for `family`, if any.
    #[must_use]
    pub fn get(&self, family: Family) -> Option<&str> {
        self.names[family.index()].as_deref()
    }
}

/// Resolves families to language services and memoizes the answer.
///
/// The cache lives as long as the router. Failed lookups are cached as
/// "no delegate" so a missing language is reported once.
pub struct SubLanguageRouter {
    languages: FamilyLanguages,
    registry: Rc<dyn LanguageRegistry>,
    cache: RefCell<HashMap<Family, Option<Rc<dyn LanguageService>>>>,
    lookups: Cell<usize>,
}

impl SubLanguageRouter {
    /// Creates a router over `registry`.
    #[must_use]
    pub fn new(languages: FamilyLanguages, registry: Rc<dyn LanguageRegistry>) -> Self {
        Self {
            languages,
            registry,
            cache: RefCell::new(HashMap::new()),
            lookups: Cell::new(0),
        }
    }

    /// The descriptor this router resolves from.
    #[must_use]
    pub fn languages(&self) -> &FamilyLanguages {
        &self.languages
    }

    /// Service handling `family`, or `None` when the composite language
    /// handles it itself.
    pub fn resolve(&self, family: Family) -> Option<Rc<dyn LanguageService>> {
        if let Some(cached) = self.cache.borrow().get(&family) {
            return cached.clone();
        }

        let resolved = self.languages.get(family).and_then(|name| {
            self.lookups.set(self.lookups.get() + 1);
            match self.registry.get_language(name) {
                Ok(service) => {
                    debug!("Resolved {} family to {}", family, name);
                    Some(service)
                }
                Err(e) => {
                    warn!("Cannot resolve {} family: {}", family, e);
                    None
                }
            }
        });

        self.cache.borrow_mut().insert(family, resolved.clone());
        resolved
    }

    /// Number of registry lookups performed so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}
