//! CSS Layout Engine
//!
//! This module turns the styled tree into a tree of positioned boxes.
//!
//! # Relevant Specifications
//!
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! # Module Structure
//!
//! - [`box_model`] - Box dimensions, rectangles, and edge sizes
//! - [`values`] - Auto values and per-side property lookup
//! - [`layout_box`] - Layout box types and box tree construction
//! - `block` - Block width, position and height resolution

mod block;
pub mod box_model;
pub mod layout_box;
pub mod values;

use std::fmt::Write;

pub use box_model::{BoxDimensions, EdgeSizes, Rect};
pub use layout_box::{BoxType, LayoutBox, LayoutError};
pub use values::AutoOr;

use crate::cascade::StyledNode;

/// Build the geometry-free box tree for a styled tree.
///
/// # Errors
///
/// Returns [`LayoutError::DisplayNoneRoot`] if the root has `display: none`.
pub fn build_layout_tree(root: StyledNode) -> Result<LayoutBox, LayoutError> {
    LayoutBox::build_layout_tree(root)
}

/// Render a box tree as one box per line: type, generating node and the
/// used content rectangle, followed by any non-zero edges.
#[must_use]
pub fn dump_layout_tree(root: &LayoutBox) -> String {
    let mut out = String::new();
    dump_box(root, 0, &mut out);
    out
}

fn dump_box(layout_box: &LayoutBox, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let d = &layout_box.dimensions;
    let _ = write!(out, "{indent}{}", layout_box.box_type.as_ref());
    if let Some(node) = &layout_box.node {
        let _ = write!(out, " {}", node.label());
    }
    let _ = write!(
        out,
        " [x={} y={} w={} h={}]",
        d.content.x, d.content.y, d.content.width, d.content.height
    );
    for (name, edges) in [("margin", d.margin), ("border", d.border), ("padding", d.padding)] {
        if !edges.is_zero() {
            let _ = write!(
                out,
                " {name}=({} {} {} {})",
                edges.top, edges.right, edges.bottom, edges.left
            );
        }
    }
    out.push('\n');
    for child in &layout_box.children {
        dump_box(child, depth + 1, out);
    }
}
