//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use serde::Serialize;

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// Only the content rectangle is positioned; the outer boxes are derived
/// from it by expanding through the edge sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoxDimensions {
    /// Content area, positioned in viewport coordinates.
    pub content: Rect,
    /// Padding widths around the content.
    pub padding: EdgeSizes,
    /// Border widths around the padding.
    pub border: EdgeSizes,
    /// Margin widths around the border.
    pub margin: EdgeSizes,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// Edge sizes for padding, border, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the rectangle outward by `edges` on every side.
    #[must_use]
    pub fn expanded_by(self, edges: EdgeSizes) -> Self {
        Self {
            x: self.x - edges.left,
            y: self.y - edges.top,
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl EdgeSizes {
    /// Sum of the left and right edges.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// True if every edge is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

impl BoxDimensions {
    // ┌─────────────────────────────────────────┐
    // │              margin-top                 │
    // │   ┌─────────────────────────────────┐   │
    // │   │          border-top             │   │
    // │   │   ┌─────────────────────────┐   │   │
    // │   │   │      padding-top        │   │   │
    // │   │   │   ┌─────────────────┐   │   │   │
    // │ m │ b │ p │     CONTENT     │ p │ b │ m │
    // │   │   │   └─────────────────┘   │   │   │
    // │   │   │      padding-bottom     │   │   │
    // │   │   └─────────────────────────┘   │   │
    // │   │          border-bottom          │   │
    // │   └─────────────────────────────────┘   │
    // │              margin-bottom              │
    // └─────────────────────────────────────────┘

    /// The containing block for a root box: content `(0, 0, width, 0)`.
    ///
    /// The zero height places the root's top margin edge at y = 0.
    #[must_use]
    pub fn viewport(width: f32) -> Self {
        Self {
            content: Rect::new(0.0, 0.0, width, 0.0),
            ..Self::default()
        }
    }

    /// [§ 3.2 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    ///
    /// "The padding box contains both the content and padding areas."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded_by(self.padding)
    }

    /// [§ 3.3 Borders](https://www.w3.org/TR/css-box-3/#borders)
    ///
    /// "The border box contains content, padding, and border areas."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded_by(self.border)
    }

    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    ///
    /// "The margin box is the outermost box, and contains all four areas."
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded_by(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxDimensions {
        let edges = |n: f32| EdgeSizes {
            top: n,
            right: n,
            bottom: n,
            left: n,
        };
        BoxDimensions {
            content: Rect::new(20.0, 30.0, 100.0, 50.0),
            padding: edges(2.0),
            border: edges(3.0),
            margin: edges(5.0),
        }
    }

    #[test]
    fn test_nested_boxes_expand_outward() {
        let d = sample();
        assert_eq!(d.padding_box(), Rect::new(18.0, 28.0, 104.0, 54.0));
        assert_eq!(d.border_box(), Rect::new(15.0, 25.0, 110.0, 60.0));
        assert_eq!(d.margin_box(), Rect::new(10.0, 20.0, 120.0, 70.0));
    }

    #[test]
    fn test_edge_sums() {
        let edges = EdgeSizes {
            top: 1.0,
            right: 2.0,
            bottom: 3.0,
            left: 4.0,
        };
        assert_eq!(edges.horizontal(), 6.0);
        assert_eq!(edges.vertical(), 4.0);
        assert!(!edges.is_zero());
    }

    #[test]
    fn test_viewport_has_zero_height() {
        let cb = BoxDimensions::viewport(800.0);
        assert_eq!(cb.content, Rect::new(0.0, 0.0, 800.0, 0.0));
        assert!(cb.margin.is_zero());
    }
}
