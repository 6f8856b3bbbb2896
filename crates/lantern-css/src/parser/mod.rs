//! Stylesheet parser module.

/// Stylesheet model and the cursor-based parser that builds it.
pub mod css_parser;

pub use css_parser::{CSSParser, Declaration, Rule, Stylesheet, StylesheetError, parse_stylesheet};
