//! Integration tests for the cascade.

use lantern_css::cascade::dump_styled_tree;
use lantern_css::{ColorValue, Stylesheet, Value, parse_stylesheet, resolve, resolve_tree};
use lantern_dom::{AttributesMap, ElementData, Node};
use lantern_html::parse_html;

fn parse_css(css: &str) -> Stylesheet {
    parse_stylesheet(css).unwrap()
}

/// Helper to create element data
fn make_element(tag: &str, id: Option<&str>, classes: &[&str]) -> ElementData {
    let mut attrs = AttributesMap::new();
    if let Some(id_val) = id {
        let _ = attrs.insert("id".to_string(), id_val.to_string());
    }
    if !classes.is_empty() {
        let _ = attrs.insert("class".to_string(), classes.join(" "));
    }
    ElementData::new(tag, attrs)
}

#[test]
fn test_higher_specificity_wins_regardless_of_order() {
    let sheet = parse_css("#a { color: blue; } p { color: red; }");
    let values = resolve(&make_element("p", Some("a"), &[]), &sheet);
    assert_eq!(values.get("color"), Some(&Value::keyword("blue")));
}

#[test]
fn test_equal_specificity_later_rule_wins() {
    let sheet = parse_css(".x { width: 10px; } .y { width: 20px; }");
    let values = resolve(&make_element("div", None, &["x", "y"]), &sheet);
    assert_eq!(values.get("width"), Some(&Value::px(20.0)));
}

#[test]
fn test_non_conflicting_declarations_merge() {
    let sheet = parse_css("div { width: 10px; } .x { height: 5px; } #none { color: red; }");
    let values = resolve(&make_element("div", None, &["x"]), &sheet);
    assert_eq!(values.len(), 2);
    assert_eq!(values.get("width"), Some(&Value::px(10.0)));
    assert_eq!(values.get("height"), Some(&Value::px(5.0)));
}

#[test]
fn test_rule_uses_its_most_specific_matching_selector() {
    // The first rule matches through `p#a`, which outranks `.x`.
    let sheet = parse_css("span, p#a { color: red; } .x { color: blue; }");
    let values = resolve(&make_element("p", Some("a"), &["x"]), &sheet);
    assert_eq!(values.get("color"), Some(&Value::keyword("red")));
}

#[test]
fn test_values_are_stored_unvalidated() {
    let sheet = parse_css("p { display: flexbox; width: 3vw; color: #0f0 }");
    let values = resolve(&make_element("p", None, &[]), &sheet);
    assert_eq!(values.get("display"), Some(&Value::keyword("flexbox")));
    assert_eq!(values.get("width"), Some(&Value::keyword("3vw")));
    assert_eq!(
        values.get("color"),
        Some(&Value::Color(ColorValue::rgb(0, 255, 0)))
    );
}

#[test]
fn test_no_matching_rules_gives_empty_map() {
    let sheet = parse_css("#a { color: red }");
    assert!(resolve(&make_element("p", None, &[]), &sheet).is_empty());
}

#[test]
fn test_resolve_tree_mirrors_markup_shape() {
    let root = parse_html("<ul><li class=\"a\">1</li><li>2</li></ul>").unwrap();
    let nodes = root.count();
    let styled = resolve_tree(root, &parse_css(".a { color: red }"));

    assert_eq!(styled.count(), nodes);
    assert_eq!(styled.children.len(), 2);
    assert_eq!(styled.children[0].value("color"), Some(&Value::keyword("red")));
    assert!(styled.children[1].specified_values.is_empty());
    // Text nodes never receive values.
    assert!(styled.children[0].children[0].specified_values.is_empty());
}

#[test]
fn test_universal_rule_is_weakest() {
    let sheet = parse_css("p { color: red } * { color: blue }");
    let values = resolve(&make_element("p", None, &[]), &sheet);
    assert_eq!(values.get("color"), Some(&Value::keyword("red")));
}

#[test]
fn test_dump_styled_tree() {
    let root = Node::element(
        "div",
        AttributesMap::new(),
        vec![Node::text("hi")],
    );
    let styled = resolve_tree(root, &parse_css("div { display: block }"));
    assert_eq!(dump_styled_tree(&styled), "<div> { display: block }\n  \"hi\"\n");
}
