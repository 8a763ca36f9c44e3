//! The composite (UDL) language service.

use crate::boundary::meaningful_family_at;
use crate::buffer::{EditorBuffer, StatusReporter};
use crate::comment::{CommentDelimiters, CommentOp, CommentOutcome, Commenter};
use crate::error::LangError;
use crate::family::{classify, Family, StyleId};
use crate::indent::{self, IndentStyle, KeyAction};
use crate::router::{FamilyLanguages, SubLanguageRouter};
use crate::service::{LanguageRegistry, LanguageService};
use crate::style_info::StyleInfo;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

/// Status message shown when a comment request spans two families.
pub const CROSS_FAMILY_MESSAGE: &str = "Unable to comment across different sub languages";

/// Who provides XML-style smart indent at a position.
#[derive(Clone)]
pub enum XmlIndentProvider {
    /// The composite language itself.
    Composite,
    /// A delegated sub-language.
    Delegate(Rc<dyn LanguageService>),
}

impl std::fmt::Debug for XmlIndentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Composite => f.write_str("Composite"),
            Self::Delegate(service) => f.debug_tuple("Delegate").field(&service.name()).finish(),
        }
    }
}

/// A language made of up to five families, each optionally delegated to
/// a registered sub-language.
///
/// Every editing request first works out which family owns the relevant
/// position, then hands the request to that family's delegate. A family
/// without a delegate, or whose delegate is this language itself, is
/// handled here with the base routines so resolution always terminates.
pub struct UdlLanguage {
    name: String,
    router: SubLanguageRouter,
    delimiters: [CommentDelimiters; 5],
    xml_indent: bool,
    commenters: RefCell<HashMap<Family, Rc<Commenter>>>,
}

impl UdlLanguage {
    /// Creates a composite language.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        languages: FamilyLanguages,
        registry: Rc<dyn LanguageRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            router: SubLanguageRouter::new(languages, registry),
            delimiters: [
                CommentDelimiters::block("<!--", "-->"),
                CommentDelimiters::block("/*", "*/"),
                CommentDelimiters::line("//").with_block("/*", "*/"),
                CommentDelimiters::none(),
                CommentDelimiters::none(),
            ],
            xml_indent: false,
            commenters: RefCell::new(HashMap::new()),
        }
    }

    /// Comment syntax used for `family` when it is not delegated.
    #[must_use]
    pub fn with_comment_delimiters(
        mut self,
        family: Family,
        delimiters: CommentDelimiters,
    ) -> Self {
        self.delimiters[family.index()] = delimiters;
        self
    }

    /// Enables XML-style smart indent for the whole document.
    #[must_use]
    pub fn with_xml_indent(mut self, enabled: bool) -> Self {
        self.xml_indent = enabled;
        self
    }

    /// The family router.
    #[must_use]
    pub fn router(&self) -> &SubLanguageRouter {
        &self.router
    }

    /// Delegate for `family`, excluding this language itself.
    fn delegate(&self, family: Family) -> Option<Rc<dyn LanguageService>> {
        self.router
            .resolve(family)
            .filter(|service| service.name() != self.name)
    }

    /// Effect of `ch`, already known to be styled `style`.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownStyle`] for styles outside every family.
    pub fn brace_indent_style(&self, ch: char, style: StyleId) -> Result<IndentStyle, LangError> {
        let family = classify(style)?;
        let info = StyleInfo::for_family(family);
        Ok(match self.delegate(family) {
            Some(service) => service.brace_indent_style_for_family(ch, style, info),
            None => indent::brace_indent_style(ch, style, info),
        })
    }

    /// Reaction to `ch`, which was just typed before the caret.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownStyle`] for styles outside every family.
    pub fn key_pressed(&self, buf: &dyn EditorBuffer, ch: char) -> Result<KeyAction, LangError> {
        let pos = buf.position_before(buf.current_position());
        let family = meaningful_family_at(buf, pos)?;
        let info = StyleInfo::for_family(family);
        match self.delegate(family) {
            Some(service) => service.key_pressed_for_family(buf, ch, info),
            None => Ok(indent::key_pressed(buf, ch, info)),
        }
    }

    /// Finds who provides XML-style smart indent at `pos`: this language,
    /// the family at `pos`, or the family just before it.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownStyle`] for styles outside every family.
    pub fn supports_xml_indent_here(
        &self,
        buf: &dyn EditorBuffer,
        pos: usize,
    ) -> Result<Option<XmlIndentProvider>, LangError> {
        if self.xml_indent {
            return Ok(Some(XmlIndentProvider::Composite));
        }

        let mut candidates = vec![pos];
        if pos > 0 {
            candidates.push(buf.position_before(pos));
        }
        for candidate in candidates {
            let family = classify(buf.style_at(candidate))?;
            if let Some(service) = self.delegate(family) {
                if service.supports_xml_indent() {
                    return Ok(Some(XmlIndentProvider::Delegate(service)));
                }
            }
        }
        Ok(None)
    }

    /// Comments out the selected lines.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownStyle`] for styles outside every family.
    pub fn comment(
        &self,
        buf: &mut dyn EditorBuffer,
        status: &mut dyn StatusReporter,
    ) -> Result<CommentOutcome, LangError> {
        self.run_comment(buf, status, CommentOp::Comment)
    }

    /// Removes comment markers from the selected lines.
    ///
    /// # Errors
    ///
    /// Returns [`LangError::UnknownStyle`] for styles outside every family.
    pub fn uncomment(
        &self,
        buf: &mut dyn EditorBuffer,
        status: &mut dyn StatusReporter,
    ) -> Result<CommentOutcome, LangError> {
        self.run_comment(buf, status, CommentOp::Uncomment)
    }

    fn run_comment(
        &self,
        buf: &mut dyn EditorBuffer,
        status: &mut dyn StatusReporter,
        op: CommentOp,
    ) -> Result<CommentOutcome, LangError> {
        let Some((family, start, end)) = comment_scope(buf)? else {
            debug!("Refusing {:?} across families in {}", op, self.name);
            status.status_message(CROSS_FAMILY_MESSAGE);
            return Ok(CommentOutcome::Refused);
        };
        Ok(self.commenter_for(family).apply(buf, op, start, end))
    }

    fn commenter_for(&self, family: Family) -> Rc<Commenter> {
        if let Some(commenter) = self.commenters.borrow().get(&family) {
            return Rc::clone(commenter);
        }
        let delimiters = match self.delegate(family) {
            Some(service) => service.comment_delimiters(),
            None => self.delimiters[family.index()].clone(),
        };
        let commenter = Rc::new(Commenter::new(delimiters));
        self.commenters
            .borrow_mut()
            .insert(family, Rc::clone(&commenter));
        commenter
    }
}

/// Family and effective range of a comment request, or `None` when the
/// request spans two families.
fn comment_scope(buf: &dyn EditorBuffer) -> Result<Option<(Family, usize, usize)>, LangError> {
    let (mut start, end) = buf.selection();

    if start == end {
        let line = buf.line_from_position(start);
        let line_start = buf.line_start_position(line);
        let line_end = buf.line_end_position(line);
        let first = classify(buf.style_at(line_start))?;
        let last = classify(buf.style_at(buf.position_before(line_end).max(line_start)))?;
        return Ok((first == last).then_some((first, start, end)));
    }

    let end_family = classify(buf.style_at(buf.position_before(end)))?;
    let mut start_family = classify(buf.style_at(start))?;

    // A selection starting right after `<script>` belongs to the script.
    let line = buf.line_from_position(start);
    if start_family == Family::Markup
        && start == buf.line_end_position(line)
        && line + 1 < buf.line_count()
    {
        let next = buf.line_start_position(line + 1);
        if next < end {
            let next_family = classify(buf.style_at(next))?;
            if next_family != Family::Markup && next_family == end_family {
                start_family = next_family;
                start = next;
            }
        }
    }

    Ok((start_family == end_family).then_some((start_family, start, end)))
}

impl LanguageService for UdlLanguage {
    fn name(&self) -> &str {
        &self.name
    }

    fn comment_delimiters(&self) -> CommentDelimiters {
        self.delimiters[Family::Markup.index()].clone()
    }

    fn supports_xml_indent(&self) -> bool {
        self.xml_indent
    }

    fn compute_indent(
        &self,
        buf: &dyn EditorBuffer,
        continue_comment: bool,
    ) -> Result<String, LangError> {
        if continue_comment {
            return Ok(indent::continue_comment(buf));
        }
        let pos = buf.position_before(buf.current_position());
        let family = meaningful_family_at(buf, pos)?;
        let info = StyleInfo::for_family(family);
        match self.delegate(family) {
            Some(service) => {
                debug!("Delegating {} indent to {}", family, service.name());
                service.compute_indent_for_family(buf, info)
            }
            None => Ok(indent::compute_indent(buf, info)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::StyledBuffer;
    use crate::family::styles::*;
    use crate::service::{InMemoryLanguageRegistry, SimpleLanguage};

    fn html() -> UdlLanguage {
        let registry = InMemoryLanguageRegistry::new()
            .with(Rc::new(SimpleLanguage::new(
                "JavaScript",
                CommentDelimiters::line("//"),
            )))
            .with(Rc::new(
                SimpleLanguage::new("XML", CommentDelimiters::block("<!--", "-->"))
                    .xml_indent(true),
            ));
        UdlLanguage::new(
            "HTML",
            FamilyLanguages::new()
                .with(Family::Markup, "XML")
                .with(Family::Csl, "JavaScript"),
            Rc::new(registry),
        )
    }

    #[test]
    fn commenters_are_memoized_per_family() {
        let lang = html();
        let first = lang.commenter_for(Family::Csl);
        let second = lang.commenter_for(Family::Csl);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.delimiters().line.as_deref(), Some("//"));
    }

    #[test]
    fn undelegated_family_uses_local_delimiters() {
        let lang = html().with_comment_delimiters(Family::Ssl, CommentDelimiters::line("#"));
        assert_eq!(
            lang.commenter_for(Family::Ssl).delimiters().line.as_deref(),
            Some("#")
        );
    }

    #[test]
    fn xml_indent_is_found_through_the_markup_delegate() {
        let lang = html();
        let buf = StyledBuffer::new()
            .push("<a>", M_TAGNAME)
            .push("x", CSL_IDENTIFIER);
        let provider = lang.supports_xml_indent_here(&buf, 0).expect("styles are valid");
        assert!(matches!(provider, Some(XmlIndentProvider::Delegate(s)) if s.name() == "XML"));

        // Position 3 is script, but the character before it is markup.
        let provider = lang.supports_xml_indent_here(&buf, 3).expect("styles are valid");
        assert!(provider.is_some());
    }

    #[test]
    fn xml_indent_on_the_composite_wins() {
        let lang = html().with_xml_indent(true);
        let buf = StyledBuffer::new().push("x", CSL_IDENTIFIER);
        assert!(matches!(
            lang.supports_xml_indent_here(&buf, 0),
            Ok(Some(XmlIndentProvider::Composite))
        ));
    }

    #[test]
    fn no_xml_indent_inside_script() {
        let lang = html();
        let buf = StyledBuffer::new().push("xy", CSL_IDENTIFIER);
        assert!(matches!(lang.supports_xml_indent_here(&buf, 1), Ok(None)));
    }

    #[test]
    fn brace_style_follows_the_style_family() {
        let lang = html();
        assert_eq!(lang.brace_indent_style('{', CSL_OPERATOR), Ok(IndentStyle::Indent));
        assert_eq!(lang.brace_indent_style('{', M_OPERATOR), Ok(IndentStyle::None));
        assert!(lang.brace_indent_style('{', StyleId(200)).is_err());
    }
}
