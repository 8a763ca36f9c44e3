//! # udl-lang
//!
//! Style ownership resolution for documents that mix several languages
//! (UDL: user-defined languages).
//!
//! The composite lexer assigns every character a style id, and every style
//! id belongs to one of five [`Family`] ranges. This crate decides which
//! family owns a buffer position, routes the family to the concrete
//! sub-language registered for it, and delegates indentation, brace and
//! commenting requests accordingly:
//!
//! - [`classify`] maps a style id to its family
//! - [`meaningful_style_at`] resolves positions on a family boundary
//! - [`SubLanguageRouter`] memoizes family to language resolution
//! - [`UdlLanguage`] is the composite [`LanguageService`]
//!
//! Everything here runs on the editor thread; caches use `Rc`/`RefCell`
//! and are not shareable across threads.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use udl_lang::styles::*;
//! use udl_lang::{
//!     CommentDelimiters, Family, FamilyLanguages, InMemoryLanguageRegistry,
//!     LanguageService, SimpleLanguage, StyledBuffer, UdlLanguage,
//! };
//!
//! let registry = InMemoryLanguageRegistry::new().with(Rc::new(SimpleLanguage::new(
//!     "JavaScript",
//!     CommentDelimiters::line("//"),
//! )));
//! let html = UdlLanguage::new(
//!     "HTML",
//!     FamilyLanguages::new().with(Family::Csl, "JavaScript"),
//!     Rc::new(registry),
//! );
//!
//! let buf = StyledBuffer::new()
//!     .push("<script>", M_TAGNAME)
//!     .push("f() ", CSL_IDENTIFIER)
//!     .push("{", CSL_OPERATOR)
//!     .with_cursor_at_end();
//! assert_eq!(html.compute_indent(&buf, false).unwrap(), "    ");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod boundary;
mod buffer;
mod comment;
mod error;
mod family;
mod feud;
mod indent;
mod router;
mod service;
mod style_info;
mod udl;

pub use boundary::{meaningful_family_at, meaningful_style_at};
pub use buffer::{EditorBuffer, IndentSettings, StatusReporter, StyledBuffer};
pub use comment::{CommentDelimiters, CommentOp, CommentOutcome, Commenter};
pub use error::LangError;
pub use family::{classify, is_default_style, styles, Family, StyleId};
pub use feud::{feud, winner, FeudEntry, LookupType, Side};
pub use indent::{
    brace_indent_style, compute_indent, continue_comment, key_pressed, leading_whitespace,
    IndentStyle, KeyAction,
};
pub use router::{FamilyLanguages, SubLanguageRouter};
pub use service::{InMemoryLanguageRegistry, LanguageRegistry, LanguageService, SimpleLanguage};
pub use style_info::StyleInfo;
pub use udl::{UdlLanguage, XmlIndentProvider, CROSS_FAMILY_MESSAGE};
