//! Tests for building and inspecting markup trees.

use lantern_dom::{AttributesMap, ElementData, Node, NodeKind, dump_tree};

/// Helper to build an attribute map from literal pairs.
fn attrs(pairs: &[(&str, &str)]) -> AttributesMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ========== ElementData ==========

#[test]
fn test_classes_absent_is_empty() {
    let data = ElementData::new("div", AttributesMap::new());
    assert!(data.classes().is_empty());
}

#[test]
fn test_duplicate_classes_collapse() {
    let data = ElementData::new("div", attrs(&[("class", "a a b")]));
    assert_eq!(data.classes().len(), 2);
}

#[test]
fn test_id_is_read_verbatim() {
    let data = ElementData::new("div", attrs(&[("id", "Main")]));
    assert_eq!(data.id(), Some("Main"));
}

// ========== Node ==========

#[test]
fn test_text_node_has_no_children() {
    let node = Node::text("hello");
    assert!(node.children().is_empty());
    assert_eq!(node.as_element(), None);
    assert_eq!(node.count(), 1);
}

#[test]
fn test_text_into_parts() {
    let (kind, children) = Node::text("hi").into_parts();
    assert_eq!(kind, NodeKind::Text("hi".to_string()));
    assert!(children.is_empty());
}

#[test]
fn test_nested_count() {
    let tree = Node::element(
        "div",
        AttributesMap::new(),
        vec![
            Node::element("p", AttributesMap::new(), vec![Node::text("a")]),
            Node::element("p", AttributesMap::new(), vec![Node::text("b")]),
        ],
    );
    assert_eq!(tree.count(), 5);
}

// ========== Labels and dumps ==========

#[test]
fn test_long_text_label_is_truncated() {
    let label = NodeKind::Text("x".repeat(60)).label();
    assert_eq!(label, format!("\"{}...\"", "x".repeat(40)));
}

#[test]
fn test_text_label_is_trimmed() {
    assert_eq!(NodeKind::Text("  hi \n".to_string()).label(), "\"hi\"");
}

#[test]
fn test_dump_lists_attributes_in_name_order() {
    let node = Node::element("a", attrs(&[("id", "x"), ("class", "c")]), vec![]);
    assert_eq!(dump_tree(&node), "<a class=\"c\" id=\"x\">\n");
}
