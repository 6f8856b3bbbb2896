//! Markup parser for the Lantern rendering pipeline.
//!
//! # Scope
//!
//! This crate turns a small, strict subset of HTML into a [`lantern_dom::Node`] tree:
//! - Elements with explicit closing tags (`<p>...</p>`)
//! - Quoted attributes (`id="a"`, `class='x y'`)
//! - Text runs between tags
//!
//! # Not Yet Implemented
//!
//! - Void and self-closing elements
//! - Comments, doctypes and character references
//! - Error recovery: any deviation from the grammar is reported as a
//!   [`MarkupError`] with the byte offset where it was detected

/// Cursor-based markup parser.
pub mod parser;

pub use parser::{HTMLParser, MarkupError, parse_html};
