//! Language service and language registry collaborators.

use crate::buffer::EditorBuffer;
use crate::comment::CommentDelimiters;
use crate::error::LangError;
use crate::family::StyleId;
use crate::indent::{self, IndentStyle, KeyAction};
use crate::style_info::StyleInfo;
use std::collections::HashMap;
use std::rc::Rc;

/// Editing behaviour of one language.
///
/// Every method has a default built on the routines in [`crate::indent`],
/// so a terminal language only has to name itself and its comment syntax.
/// The `*_for_family` methods are what a composite document calls when it
/// delegates a UDL family to this language; `info` describes the family's
/// style ids.
pub trait LanguageService {
    /// Language name as registered (e.g. "JavaScript").
    fn name(&self) -> &str;

    /// Comment syntax.
    fn comment_delimiters(&self) -> CommentDelimiters {
        CommentDelimiters::none()
    }

    /// Whether the language uses XML-style smart indent.
    fn supports_xml_indent(&self) -> bool {
        false
    }

    /// Indent for a new line inserted at the caret.
    ///
    /// # Errors
    ///
    /// Implementations that classify styles may return [`LangError`].
    fn compute_indent(
        &self,
        buf: &dyn EditorBuffer,
        continue_comment: bool,
    ) -> Result<String, LangError> {
        if continue_comment {
            return Ok(indent::continue_comment(buf));
        }
        Ok(indent::compute_indent(buf, StyleInfo::plain()))
    }

    /// Indent for a new line inside a delegated family.
    ///
    /// # Errors
    ///
    /// Implementations that classify styles may return [`LangError`].
    fn compute_indent_for_family(
        &self,
        buf: &dyn EditorBuffer,
        info: &StyleInfo,
    ) -> Result<String, LangError> {
        Ok(indent::compute_indent(buf, info))
    }

    /// Effect of `ch` (styled `style`) inside a delegated family.
    fn brace_indent_style_for_family(
        &self,
        ch: char,
        style: StyleId,
        info: &StyleInfo,
    ) -> IndentStyle {
        indent::brace_indent_style(ch, style, info)
    }

    /// Reaction to `ch` typed inside a delegated family.
    ///
    /// # Errors
    ///
    /// Implementations that classify styles may return [`LangError`].
    fn key_pressed_for_family(
        &self,
        buf: &dyn EditorBuffer,
        ch: char,
        info: &StyleInfo,
    ) -> Result<KeyAction, LangError> {
        Ok(indent::key_pressed(buf, ch, info))
    }
}

/// Looks up language services by name.
pub trait LanguageRegistry {
    /// Returns the service registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownLanguage`] for unregistered names.
    fn get_language(&self, name: &str) -> Result<Rc<dyn LanguageService>, LangError>;
}

/// A language registry backed by a map.
#[derive(Default)]
pub struct InMemoryLanguageRegistry {
    languages: HashMap<String, Rc<dyn LanguageService>>,
}

impl InMemoryLanguageRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `service` under its own name.
    pub fn register(&mut self, service: Rc<dyn LanguageService>) {
        self.languages.insert(service.name().to_string(), service);
    }

    /// Registers `service` and returns the registry.
    #[must_use]
    pub fn with(mut self, service: Rc<dyn LanguageService>) -> Self {
        self.register(service);
        self
    }

    /// Registered language names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl LanguageRegistry for InMemoryLanguageRegistry {
    fn get_language(&self, name: &str) -> Result<Rc<dyn LanguageService>, LangError> {
        self.languages
            .get(name)
            .cloned()
            .ok_or_else(|| LangError::UnknownLanguage {
                name: name.to_string(),
            })
    }
}

/// A terminal language described only by its name and comment syntax.
#[derive(Debug, Clone)]
pub struct SimpleLanguage {
    name: String,
    delimiters: CommentDelimiters,
    xml_indent: bool,
}

impl SimpleLanguage {
    /// Creates a language with the given name and comment syntax.
    #[must_use]
    pub fn new(name: impl Into<String>, delimiters: CommentDelimiters) -> Self {
        Self {
            name: name.into(),
            delimiters,
            xml_indent: false,
        }
    }

    /// Marks the language as using XML-style smart indent.
    #[must_use]
    pub fn xml_indent(mut self, enabled: bool) -> Self {
        self.xml_indent = enabled;
        self
    }
}

impl LanguageService for SimpleLanguage {
    fn name(&self) -> &str {
        &self.name
    }

    fn comment_delimiters(&self) -> CommentDelimiters {
        self.delimiters.clone()
    }

    fn supports_xml_indent(&self) -> bool {
        self.xml_indent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_by_name() {
        let registry = InMemoryLanguageRegistry::new()
            .with(Rc::new(SimpleLanguage::new("Python", CommentDelimiters::line("#"))))
            .with(Rc::new(SimpleLanguage::new("CSS", CommentDelimiters::block("/*", "*/"))));

        assert_eq!(registry.names(), vec!["CSS", "Python"]);
        let python = registry.get_language("Python").expect("registered");
        assert_eq!(python.comment_delimiters().line.as_deref(), Some("#"));
    }

    #[test]
    fn unknown_language_is_an_error() {
        let registry = InMemoryLanguageRegistry::new();
        assert!(matches!(
            registry.get_language("Cobol"),
            Err(LangError::UnknownLanguage { name }) if name == "Cobol"
        ));
    }
}
