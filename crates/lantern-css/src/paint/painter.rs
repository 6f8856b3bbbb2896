//! Painter - generates display list from layout tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the layout tree in pre-order. Ancestors are emitted
//! before descendants, so later commands paint over earlier ones.

use crate::layout::{BoxType, LayoutBox, Rect};
use crate::style::{ColorValue, Value};

use super::{DisplayCommand, DisplayList};

/// Painter that generates a display list from a layout tree.
///
/// Colors come from each box's specified values. Boxes that do not set a
/// color are painted with the painter's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    /// Background for boxes without `background`.
    pub default_background: ColorValue,
    /// Border color for boxes without `border-color`.
    pub default_border_color: ColorValue,
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter {
    /// A painter whose defaults are mid-gray.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_background: ColorValue::MID_GRAY,
            default_border_color: ColorValue::MID_GRAY,
        }
    }

    /// Paint a layout tree and return the display list.
    #[must_use]
    pub fn paint(&self, layout: &LayoutBox) -> DisplayList {
        let mut display_list = DisplayList::new();
        self.paint_box(layout, &mut display_list);
        log::debug!(
            "painted {} boxes into {} commands",
            layout.count(),
            display_list.len()
        );
        display_list
    }

    /// For each box:
    /// 1. Background color
    /// 2. Border
    /// 3. Descendants, in tree order
    ///
    /// Anonymous boxes have no style of their own and paint nothing; their
    /// children still do.
    fn paint_box(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        if layout_box.box_type != BoxType::Anonymous {
            self.paint_background(layout_box, display_list);
            self.paint_borders(layout_box, display_list);
        }

        for child in &layout_box.children {
            self.paint_box(child, display_list);
        }
    }

    /// [§ 3.2 Painting Area](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
    ///
    /// "The background is painted within the border box" (initial
    /// `background-clip: border-box`).
    fn paint_background(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        let color = resolve_color(
            layout_box,
            &["background", "background-color"],
            self.default_background,
        );
        display_list.push(DisplayCommand::SolidColor {
            rect: layout_box.dimensions.border_box(),
            color,
        });
    }

    /// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
    ///
    /// One strip per side, spanning the full border box. Sides with zero
    /// width are skipped.
    fn paint_borders(&self, layout_box: &LayoutBox, display_list: &mut DisplayList) {
        let d = &layout_box.dimensions;
        if d.border.is_zero() {
            return;
        }

        let color = resolve_color(layout_box, &["border-color"], self.default_border_color);
        let border_box = d.border_box();

        let strips = [
            // Left
            Rect::new(border_box.x, border_box.y, d.border.left, border_box.height),
            // Right
            Rect::new(
                border_box.x + border_box.width - d.border.right,
                border_box.y,
                d.border.right,
                border_box.height,
            ),
            // Top
            Rect::new(border_box.x, border_box.y, border_box.width, d.border.top),
            // Bottom
            Rect::new(
                border_box.x,
                border_box.bottom() - d.border.bottom,
                border_box.width,
                d.border.bottom,
            ),
        ];
        let sizes = [d.border.left, d.border.right, d.border.top, d.border.bottom];

        for (rect, size) in strips.into_iter().zip(sizes) {
            if size > 0.0 {
                display_list.push(DisplayCommand::SolidColor { rect, color });
            }
        }
    }
}

/// The first of `names` that resolves to a color, else `default`.
fn resolve_color(layout_box: &LayoutBox, names: &[&str], default: ColorValue) -> ColorValue {
    names
        .iter()
        .find_map(|name| layout_box.value(name).and_then(Value::to_color))
        .unwrap_or(default)
}

/// Paint a layout tree with the default painter.
#[must_use]
pub fn build_display_list(root: &LayoutBox) -> DisplayList {
    Painter::new().paint(root)
}
