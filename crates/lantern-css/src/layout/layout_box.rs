//! Layout box tree and its construction from the styled tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)

use lantern_dom::NodeKind;
use serde::Serialize;
use strum_macros::AsRefStr;
use thiserror::Error;

use super::box_model::BoxDimensions;
use crate::cascade::{PropertyMap, StyledNode};
use crate::style::{Display, Value};

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "The following sections describe the types of boxes that may be generated
/// in CSS 2.1. A box's type affects, in part, its behavior in the visual
/// formatting model."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
pub enum BoxType {
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    Block,
    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    Inline,
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "if a block container box has a block-level box inside it, then we
    /// force it to have only block-level boxes inside it."
    ///
    /// Wraps a run of consecutive inline siblings inside a block.
    Anonymous,
}

/// Failures that prevent a styled tree from producing boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The root element has `display: none`, so the document has no boxes.
    #[error("root element has display: none; there is nothing to lay out")]
    DisplayNoneRoot,
}

/// A node in the layout tree.
///
/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "Each box is associated with its generating element."
///
/// Anonymous boxes have no generating node and an empty style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBox {
    /// The type of this box.
    pub box_type: BoxType,
    /// Used geometry. All zeros until the box has been laid out.
    pub dimensions: BoxDimensions,
    /// The generating node, `None` for anonymous boxes.
    pub node: Option<NodeKind>,
    /// The generating node's specified values.
    pub style: PropertyMap,
    /// Child boxes in document order.
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// A geometry-free box generated by a node.
    #[must_use]
    pub fn new(box_type: BoxType, node: NodeKind, style: PropertyMap) -> Self {
        Self {
            box_type,
            dimensions: BoxDimensions::default(),
            node: Some(node),
            style,
            children: Vec::new(),
        }
    }

    /// An empty anonymous wrapper.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            box_type: BoxType::Anonymous,
            dimensions: BoxDimensions::default(),
            node: None,
            style: PropertyMap::new(),
            children: Vec::new(),
        }
    }

    /// The specified value of a property on the generating node.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.style.get(name)
    }

    /// Total number of boxes in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
    ///
    /// Build the box tree for a styled subtree.
    ///
    /// Children with `display: none` are dropped along with their whole
    /// subtree. Inline children of a block are routed into anonymous
    /// wrappers so that a block never holds an inline box directly.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DisplayNoneRoot`] if the root itself has
    /// `display: none`.
    pub fn build_layout_tree(root: StyledNode) -> Result<Self, LayoutError> {
        let box_type = match root.display() {
            Display::Block => BoxType::Block,
            Display::Inline => BoxType::Inline,
            Display::None => return Err(LayoutError::DisplayNoneRoot),
        };
        Ok(Self::build_box(root, box_type))
    }

    fn build_box(styled: StyledNode, box_type: BoxType) -> Self {
        let StyledNode {
            node,
            specified_values,
            children,
        } = styled;
        let mut layout_box = Self::new(box_type, node, specified_values);

        for child in children {
            match child.display() {
                Display::Block => layout_box
                    .children
                    .push(Self::build_box(child, BoxType::Block)),
                Display::Inline => layout_box
                    .inline_container()
                    .children
                    .push(Self::build_box(child, BoxType::Inline)),
                // "The element and its descendants generate no boxes"
                Display::None => {}
            }
        }

        layout_box
    }

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// The box that should receive the next inline child. Inline and
    /// anonymous boxes take inline children directly. A block reuses its
    /// trailing anonymous box, or opens a new one, so consecutive inline
    /// siblings share a single wrapper.
    fn inline_container(&mut self) -> &mut Self {
        match self.box_type {
            BoxType::Inline | BoxType::Anonymous => self,
            BoxType::Block => {
                if self
                    .children
                    .last()
                    .is_none_or(|last| last.box_type != BoxType::Anonymous)
                {
                    self.children.push(Self::anonymous());
                }
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lantern_dom::{AttributesMap, ElementData};

    use super::*;

    fn styled(tag: &str, display: Option<&str>, children: Vec<StyledNode>) -> StyledNode {
        let mut specified_values = PropertyMap::new();
        if let Some(display) = display {
            let _ = specified_values.insert("display".to_string(), Value::keyword(display));
        }
        StyledNode {
            node: NodeKind::Element(ElementData::new(tag, AttributesMap::new())),
            specified_values,
            children,
        }
    }

    #[test]
    fn test_inline_run_between_blocks_gets_own_wrapper() {
        let root = styled(
            "div",
            Some("block"),
            vec![
                styled("span", None, vec![]),
                styled("p", Some("block"), vec![]),
                styled("span", None, vec![]),
            ],
        );
        let tree = LayoutBox::build_layout_tree(root).unwrap();
        let kinds: Vec<BoxType> = tree.children.iter().map(|c| c.box_type).collect();
        assert_eq!(
            kinds,
            vec![BoxType::Anonymous, BoxType::Block, BoxType::Anonymous]
        );
    }

    #[test]
    fn test_inline_root_takes_inline_children_directly() {
        let root = styled("span", None, vec![styled("em", None, vec![])]);
        let tree = LayoutBox::build_layout_tree(root).unwrap();
        assert_eq!(tree.box_type, BoxType::Inline);
        assert_eq!(tree.children[0].box_type, BoxType::Inline);
    }

    #[test]
    fn test_anonymous_boxes_have_no_node_or_style() {
        let root = styled("div", Some("block"), vec![styled("span", None, vec![])]);
        let tree = LayoutBox::build_layout_tree(root).unwrap();
        let wrapper = &tree.children[0];
        assert!(wrapper.node.is_none());
        assert!(wrapper.style.is_empty());
        assert_eq!(tree.count(), 3);
    }
}
