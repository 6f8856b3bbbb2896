//! Stylesheet parsing, cascade, box tree construction, block layout and
//! painting for the Lantern rendering pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **Stylesheet parser** (strict subset of [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/))
//!   - Rules with comma-separated compound selectors
//!   - Single-value declarations: keywords, integers, `px`/`em` lengths, hex colors
//!   - Comments
//!
//! - **Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, and universal selectors
//!   - Specificity calculation
//!
//! - **Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Specificity-based ordering with document order as tie-breaker
//!
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block, inline and anonymous box generation
//!   - Block width, position and height resolution
//!
//! - **Painting** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Solid backgrounds and borders in painting order
//!
//! # Not Yet Implemented
//!
//! - Combinators, attribute selectors, pseudo-classes
//! - Inheritance and `!important`
//! - Multi-value shorthands (`margin: 1px 2px`)
//! - Inline formatting: every inline box gets its own line
//! - Margin collapsing, floats, positioning, flex and grid
//! - Text shaping and text painting

/// Cascade and specified values per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Box tree and block layout per [CSS 2.1 § 9-10](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Stylesheet parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Declaration values and the `display` property.
pub mod style;

// Re-exports for convenience
pub use cascade::{PropertyMap, StyledNode, resolve, resolve_tree};
pub use layout::{
    BoxDimensions, BoxType, EdgeSizes, LayoutBox, LayoutError, Rect, build_layout_tree,
};
pub use paint::{DisplayCommand, DisplayList, Painter, build_display_list};
pub use parser::{CSSParser, Declaration, Rule, Stylesheet, StylesheetError, parse_stylesheet};
pub use selector::{Selector, Specificity};
pub use style::{ColorValue, DEFAULT_FONT_SIZE_PX, Display, Unit, Value};
