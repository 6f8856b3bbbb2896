//! Markup tree for the Lantern rendering pipeline.
//!
//! # Design
//!
//! The tree is a closed set of variants ([`Node::Element`] and [`Node::Text`])
//! where every parent exclusively owns its children. There are no back
//! pointers: the cascade, box builder and layout passes all walk the tree
//! top-down, so a node never needs to reach its parent.
//!
//! The tree is immutable once built. Later pipeline stages take it by value
//! and split each node into its payload ([`NodeKind`]) and its children with
//! [`Node::into_parts`].

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use serde::Serialize;

/// Map of attribute names to values for an element, ordered by name.
pub type AttributesMap = BTreeMap<String, String>;

/// A node in the markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// An element with a tag name, attributes and owned children.
    Element {
        /// Tag name and attributes.
        data: ElementData,
        /// Child nodes in document order.
        children: Vec<Node>,
    },
    /// A run of character data.
    Text {
        /// The raw text content.
        content: String,
    },
}

/// The payload of a node with its children split off.
///
/// Produced by [`Node::into_parts`] so that later stages can keep the
/// element's identity while taking ownership of the children separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    /// Element payload.
    Element(ElementData),
    /// Text payload.
    Text(String),
}

/// Element-specific data: the tag name and attribute list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// The element's tag name as written in the markup.
    pub tag_name: String,
    /// The element's attributes.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a tag name and attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Returns the element's `id` attribute value if present.
    ///
    /// An absent attribute is not an error; selectors naming an id simply
    /// do not match such an element.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// Returns the set of class names from the whitespace-separated `class`
    /// attribute. Empty when the attribute is absent.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attrs
            .get("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }
}

impl Node {
    /// Create an element node.
    #[must_use]
    pub fn element(tag_name: impl Into<String>, attrs: AttributesMap, children: Vec<Self>) -> Self {
        Self::Element {
            data: ElementData::new(tag_name, attrs),
            children,
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Returns the element data if this is an element node.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element { data, .. } => Some(data),
            Self::Text { .. } => None,
        }
    }

    /// Returns the text content if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Element { .. } => None,
        }
    }

    /// Child nodes in document order. Always empty for text nodes.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text { .. } => &[],
        }
    }

    /// Split the node into its payload and its owned children.
    #[must_use]
    pub fn into_parts(self) -> (NodeKind, Vec<Self>) {
        match self {
            Self::Element { data, children } => (NodeKind::Element(data), children),
            Self::Text { content } => (NodeKind::Text(content), Vec::new()),
        }
    }

    /// Total number of nodes in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Self::count).sum::<usize>()
    }
}

impl NodeKind {
    /// Returns the element data if this is an element payload.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            Self::Text(_) => None,
        }
    }

    /// Short human-readable label: `<tag#id.class>` or `"text"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Element(data) => format_element_label(data),
            Self::Text(text) => format_text_label(text),
        }
    }
}

/// Render a subtree as an indented, one-node-per-line listing.
#[must_use]
pub fn dump_tree(node: &Node) -> String {
    let mut out = String::new();
    dump_node(node, 0, &mut out);
    out
}

fn dump_node(node: &Node, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Element { data, children } => {
            let _ = writeln!(out, "{indent}{}", format_element(data));
            for child in children {
                dump_node(child, depth + 1, out);
            }
        }
        Node::Text { content } => {
            let _ = writeln!(out, "{indent}{}", format_text_label(content));
        }
    }
}

/// Format an opening tag with all attributes: `<div id="a" class="x">`.
fn format_element(data: &ElementData) -> String {
    let mut tag = format!("<{}", data.tag_name);
    for (name, value) in &data.attrs {
        let _ = write!(tag, " {name}=\"{value}\"");
    }
    tag.push('>');
    tag
}

fn format_element_label(data: &ElementData) -> String {
    let mut label = format!("<{}", data.tag_name);
    if let Some(id) = data.id() {
        let _ = write!(label, "#{id}");
    }
    if let Some(class) = data.attrs.get("class") {
        for name in class.split_ascii_whitespace() {
            let _ = write!(label, ".{name}");
        }
    }
    label.push('>');
    label
}

fn format_text_label(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > 40 {
        let preview: String = trimmed.chars().take(40).collect();
        format!("\"{preview}...\"")
    } else {
        format!("\"{trimmed}\"")
    }
}
