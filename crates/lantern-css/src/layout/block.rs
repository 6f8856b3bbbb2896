//! Block layout.
//!
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! Every box is laid out as a block in normal flow. Inline boxes have no
//! line-breaking here: each one is stacked on its own line inside its
//! anonymous wrapper. Margins never collapse.

use super::box_model::BoxDimensions;
use super::layout_box::LayoutBox;
use super::values::{self, AutoOr};

impl LayoutBox {
    /// Lay out this box and its descendants inside `containing_block`.
    ///
    /// The containing block's content height is the vertical space already
    /// taken by earlier siblings; this box starts directly below it.
    ///
    /// Layout is a pure function of the box tree and the containing block:
    /// the same inputs always produce the same geometry.
    #[must_use]
    pub fn layout(mut self, containing_block: BoxDimensions) -> Self {
        self.layout_block(containing_block);
        self
    }

    fn layout_block(&mut self, containing_block: BoxDimensions) {
        // Width depends on the parent; height depends on the children.
        self.calculate_block_width(containing_block);
        self.calculate_block_position(containing_block);
        self.layout_block_children();
        self.calculate_block_height();

        log::trace!(
            "{} box at ({}, {}) {}x{}",
            self.box_type.as_ref(),
            self.dimensions.content.x,
            self.dimensions.content.y,
            self.dimensions.content.width,
            self.dimensions.content.height
        );
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// "The following constraints must hold among the used values of the
    /// other properties:
    ///
    ///   'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
    ///   'padding-right' + 'border-right-width' + 'margin-right'
    ///   = width of containing block"
    fn calculate_block_width(&mut self, containing_block: BoxDimensions) {
        let style = &self.style;

        let mut width = values::width(style);
        let mut margin_left = values::margin(style, "left");
        let mut margin_right = values::margin(style, "right");
        let border_left = values::border_width(style, "left");
        let border_right = values::border_width(style, "right");
        let padding_left = values::padding(style, "left");
        let padding_right = values::padding(style, "right");

        let edges = border_left + border_right + padding_left + padding_right;
        let total =
            margin_left.to_px_or(0.0) + margin_right.to_px_or(0.0) + edges + width.to_px_or(0.0);

        // Over-constrained with a definite width: an auto margin-left is
        // zero and margin-right absorbs the difference, whatever was declared.
        if !width.is_auto() && total > containing_block.content.width {
            if margin_left.is_auto() {
                margin_left = AutoOr::Length(0.0);
            }
            margin_right = AutoOr::Auto;
        }

        let underflow = containing_block.content.width
            - (margin_left.to_px_or(0.0) + margin_right.to_px_or(0.0))
            - edges
            - width.to_px_or(0.0);

        match (width, margin_left, margin_right) {
            // "If all of the above have a computed value other than 'auto', the
            // values are said to be 'over-constrained'... the specified value of
            // 'margin-right' is ignored and the value is calculated so as to make
            // the equality true."
            (AutoOr::Length(_), AutoOr::Length(_), AutoOr::Length(right)) => {
                margin_right = AutoOr::Length(right + underflow);
            }

            // "If there is exactly one value specified as 'auto', its used value
            // follows from the equality."
            (AutoOr::Length(_), AutoOr::Length(_), AutoOr::Auto) => {
                margin_right = AutoOr::Length(underflow);
            }
            (AutoOr::Length(_), AutoOr::Auto, AutoOr::Length(_)) => {
                margin_left = AutoOr::Length(underflow);
            }

            // "If both 'margin-left' and 'margin-right' are 'auto', their used
            // values are equal. This horizontally centers the element with
            // respect to the edges of the containing block."
            (AutoOr::Length(_), AutoOr::Auto, AutoOr::Auto) => {
                margin_left = AutoOr::Length(underflow / 2.0);
                margin_right = AutoOr::Length(underflow / 2.0);
            }

            // "If 'width' is set to 'auto', any other 'auto' values become '0'
            // and 'width' follows from the resulting equality."
            (AutoOr::Auto, _, _) => {
                if margin_left.is_auto() {
                    margin_left = AutoOr::Length(0.0);
                }
                if margin_right.is_auto() {
                    margin_right = AutoOr::Length(0.0);
                }
                if underflow >= 0.0 {
                    width = AutoOr::Length(underflow);
                } else {
                    // Width cannot go negative; the right margin takes the overflow.
                    width = AutoOr::Length(0.0);
                    margin_right = AutoOr::Length(margin_right.to_px_or(0.0) + underflow);
                }
            }
        }

        let d = &mut self.dimensions;
        d.content.width = width.to_px_or(0.0);
        d.padding.left = padding_left;
        d.padding.right = padding_right;
        d.border.left = border_left;
        d.border.right = border_right;
        d.margin.left = margin_left.to_px_or(0.0);
        d.margin.right = margin_right.to_px_or(0.0);
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "In a block formatting context, boxes are laid out one after the other,
    /// vertically, beginning at the top of a containing block."
    fn calculate_block_position(&mut self, containing_block: BoxDimensions) {
        let style = &self.style;
        let d = &mut self.dimensions;

        // Auto vertical margins are zero in normal flow.
        d.margin.top = values::margin(style, "top").to_px_or(0.0);
        d.margin.bottom = values::margin(style, "bottom").to_px_or(0.0);
        d.border.top = values::border_width(style, "top");
        d.border.bottom = values::border_width(style, "bottom");
        d.padding.top = values::padding(style, "top");
        d.padding.bottom = values::padding(style, "bottom");

        d.content.x = containing_block.content.x + d.margin.left + d.border.left + d.padding.left;

        // Below every sibling laid out before this box.
        d.content.y =
            containing_block.content.bottom() + d.margin.top + d.border.top + d.padding.top;
    }

    /// Lay out children top to bottom. This box's content height tracks the
    /// space used so far, so each child is placed directly below the last.
    fn layout_block_children(&mut self) {
        self.dimensions.content.height = 0.0;
        for child in &mut self.children {
            child.layout_block(self.dimensions);
            self.dimensions.content.height += child.dimensions.margin_box().height;
        }
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// "If 'height' is 'auto', the height depends on whether the element has
    /// any block-level children..." Here it is always the children's stacked
    /// height; an explicit length overrides it.
    fn calculate_block_height(&mut self) {
        if let Some(height) = values::height(&self.style) {
            self.dimensions.content.height = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use lantern_dom::{AttributesMap, ElementData, NodeKind};

    use super::*;
    use crate::cascade::PropertyMap;
    use crate::layout::BoxType;
    use crate::style::Value;

    fn block(style: &[(&str, Value)], children: Vec<LayoutBox>) -> LayoutBox {
        let style: PropertyMap = style
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        let mut b = LayoutBox::new(
            BoxType::Block,
            NodeKind::Element(ElementData::new("div", AttributesMap::new())),
            style,
        );
        b.children = children;
        b
    }

    #[test]
    fn test_auto_width_fills_containing_block() {
        let laid =
            block(&[("padding", Value::px(10.0))], vec![]).layout(BoxDimensions::viewport(800.0));
        assert_eq!(laid.dimensions.content.width, 780.0);
        assert_eq!(laid.dimensions.content.x, 10.0);
        assert_eq!(laid.dimensions.border_box().width, 800.0);
    }

    #[test]
    fn test_auto_width_overflow_goes_to_margin_right() {
        let laid = block(&[("margin-left", Value::px(900.0))], vec![])
            .layout(BoxDimensions::viewport(800.0));
        assert_eq!(laid.dimensions.content.width, 0.0);
        assert_eq!(laid.dimensions.margin.right, -100.0);
        assert_eq!(laid.dimensions.margin_box().width, 800.0);
    }

    #[test]
    fn test_over_constrained_ignores_declared_margin_right() {
        let laid = block(
            &[
                ("width", Value::px(700.0)),
                ("margin-left", Value::keyword("auto")),
                ("margin-right", Value::px(200.0)),
            ],
            vec![],
        )
        .layout(BoxDimensions::viewport(800.0));
        assert_eq!(laid.dimensions.margin.left, 0.0);
        assert_eq!(laid.dimensions.margin.right, 100.0);
    }

    #[test]
    fn test_single_auto_margin_left_absorbs_underflow() {
        let laid = block(
            &[("width", Value::px(300.0)), ("margin-left", Value::keyword("auto"))],
            vec![],
        )
        .layout(BoxDimensions::viewport(800.0));
        assert_eq!(laid.dimensions.margin.left, 500.0);
        assert_eq!(laid.dimensions.content.x, 500.0);
    }

    #[test]
    fn test_explicit_height_overrides_children() {
        let child = block(&[("height", Value::px(40.0))], vec![]);
        let laid = block(&[("height", Value::px(10.0))], vec![child])
            .layout(BoxDimensions::viewport(100.0));
        assert_eq!(laid.dimensions.content.height, 10.0);
        assert_eq!(laid.children[0].dimensions.content.height, 40.0);
    }

    #[test]
    fn test_relayout_of_laid_out_tree_is_stable() {
        let tree = block(&[], vec![block(&[("height", Value::px(5.0))], vec![])]);
        let once = tree.layout(BoxDimensions::viewport(50.0));
        let twice = once.clone().layout(BoxDimensions::viewport(50.0));
        assert_eq!(once, twice);
    }
}
