//! Rendering pipeline for Lantern.
//!
//! # Scope
//!
//! This crate strings the pipeline stages together:
//! - **Parsing** - markup text to a [`dom::Node`] tree, stylesheet text to a [`css::Stylesheet`]
//! - **Style** - cascade the stylesheet onto the tree
//! - **Box tree** - classify styled nodes into block, inline and anonymous boxes
//! - **Layout** - resolve every box's geometry against the viewport
//! - **Paint** - flatten the laid-out tree into a display list
//!
//! Each stage takes the previous generation by value and returns a fresh
//! tree. [`render`] runs them all; the individual stage functions are public
//! for callers that want to inspect intermediate trees.
//!
//! # Not Yet Implemented
//!
//! - `<style>` elements and linked stylesheets: the stylesheet is always
//!   supplied separately
//! - Network loading
//! - Rasterization: the display list is the final output

use std::fs;
use std::path::{Path, PathBuf};

pub use lantern_css as css;
pub use lantern_dom as dom;
pub use lantern_html as html;

use lantern_common::warning::clear_warnings;
use lantern_css::{
    BoxDimensions, DisplayList, LayoutBox, LayoutError, Rect, StyledNode, Stylesheet,
    StylesheetError,
};
use lantern_dom::Node;
use lantern_html::MarkupError;
use thiserror::Error;

/// Viewport width used when none is configured.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;

/// Viewport height used when none is configured.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

/// Settings for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Width of the initial containing block, in pixels.
    pub viewport_width: f32,
    /// Height of the visible area, in pixels. Layout ignores it; it
    /// describes the surface the display list is drawn onto.
    pub viewport_height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl RenderConfig {
    /// A configuration for a `width` x `height` viewport.
    #[must_use]
    pub const fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// The visible area at the origin.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.viewport_height)
    }

    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// The root box is laid out against a block as wide as the viewport
    /// with zero height, so the root starts at y = 0.
    #[must_use]
    pub fn containing_block(&self) -> BoxDimensions {
        BoxDimensions::viewport(self.viewport_width)
    }
}

/// Anything that stops a document from rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A source file could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The markup is malformed.
    #[error("malformed markup: {0}")]
    Markup(#[from] MarkupError),

    /// The stylesheet is malformed.
    #[error("malformed stylesheet: {0}")]
    Stylesheet(#[from] StylesheetError),

    /// The document produces no boxes.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// The final generation of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// The laid-out box tree.
    pub layout_root: LayoutBox,
    /// Paint commands, back to front.
    pub display_list: DisplayList,
}

/// Cascade `stylesheet` onto the markup tree.
#[must_use]
pub fn style(markup: Node, stylesheet: &Stylesheet) -> StyledNode {
    let nodes = markup.count();
    let styled = lantern_css::resolve_tree(markup, stylesheet);
    log::debug!(
        "styled {nodes} nodes against {} rules",
        stylesheet.rules.len()
    );
    styled
}

/// Build the geometry-free box tree.
///
/// # Errors
///
/// Returns [`LayoutError::DisplayNoneRoot`] if the root has `display: none`.
pub fn build_box_tree(styled: StyledNode) -> Result<LayoutBox, LayoutError> {
    let root = lantern_css::build_layout_tree(styled)?;
    log::debug!("built {} boxes", root.count());
    Ok(root)
}

/// Lay out the box tree against the configured viewport.
#[must_use]
pub fn layout_tree(root: LayoutBox, config: &RenderConfig) -> LayoutBox {
    let root = root.layout(config.containing_block());
    log::debug!(
        "laid out document: {}x{} margin box",
        root.dimensions.margin_box().width,
        root.dimensions.margin_box().height
    );
    root
}

/// Flatten a laid-out tree into paint commands.
#[must_use]
pub fn paint(root: &LayoutBox) -> DisplayList {
    lantern_css::build_display_list(root)
}

/// Run the whole pipeline on markup and stylesheet text.
///
/// Unsupported-feature warnings are deduplicated per thread and the set is
/// cleared at the start of each call, so every document reports its own
/// warnings once. Renders on other threads are unaffected.
///
/// # Errors
///
/// Returns a [`RenderError`] if either input is malformed or the root
/// element has `display: none`.
pub fn render(
    markup: &str,
    stylesheet: &str,
    config: &RenderConfig,
) -> Result<RenderedDocument, RenderError> {
    clear_warnings();

    let dom = lantern_html::parse_html(markup)?;
    let stylesheet = lantern_css::parse_stylesheet(stylesheet)?;

    let styled = style(dom, &stylesheet);
    let boxes = build_box_tree(styled)?;
    let layout_root = layout_tree(boxes, config);
    let display_list = paint(&layout_root);

    Ok(RenderedDocument {
        layout_root,
        display_list,
    })
}

/// Read a markup file and an optional stylesheet file, then [`render`] them.
///
/// # Errors
///
/// Returns [`RenderError::Io`] if a file cannot be read, or any error
/// [`render`] returns.
pub fn load_document(
    html_path: &Path,
    css_path: Option<&Path>,
    config: &RenderConfig,
) -> Result<RenderedDocument, RenderError> {
    let markup = read_source(html_path)?;
    let stylesheet = css_path.map(read_source).transpose()?.unwrap_or_default();
    log::debug!(
        "loaded {} ({} bytes markup, {} bytes stylesheet)",
        html_path.display(),
        markup.len(),
        stylesheet.len()
    );
    render(&markup, &stylesheet, config)
}

/// Read a source file as UTF-8.
///
/// # Errors
///
/// Returns [`RenderError::Io`] naming the path on failure.
pub fn read_source(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
