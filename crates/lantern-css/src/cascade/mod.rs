//! CSS Cascading
//!
//! This module resolves each element's specified values per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/),
//! restricted to a single author origin with no inheritance and no
//! `!important`.

use std::collections::HashMap;
use std::fmt::Write;

use lantern_dom::{ElementData, Node, NodeKind};
use serde::Serialize;

use crate::parser::{Rule, Stylesheet};
use crate::selector::Specificity;
use crate::style::{Display, Value};

/// Property name to specified value. Later writes during the cascade
/// overwrite earlier ones.
pub type PropertyMap = HashMap<String, Value>;

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// A matched rule with its specificity for cascade ordering.
struct MatchedRule<'a> {
    specificity: Specificity,
    rule: &'a Rule,
}

/// A markup node paired with its specified values.
///
/// The styled tree mirrors the markup tree one-to-one. Text nodes carry an
/// empty property map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledNode {
    /// The node's payload, moved out of the markup tree.
    pub node: NodeKind,
    /// Specified values from the cascade.
    pub specified_values: PropertyMap,
    /// Styled children in document order.
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// The specified value of a property, if any rule set it.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.specified_values.get(name)
    }

    /// [§ 2](https://www.w3.org/TR/css-display-3/#the-display-properties)
    /// The node's display type; `inline` when unset.
    #[must_use]
    pub fn display(&self) -> Display {
        Display::from_value(self.value("display"))
    }

    /// Total number of styled nodes in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// Look up `name`, falling back to the shorthand `fallback` when it is unset.
///
/// Used for per-side properties: `margin-left` falls back to `margin`.
#[must_use]
pub fn lookup<'a>(values: &'a PropertyMap, name: &str, fallback: &str) -> Option<&'a Value> {
    values.get(name).or_else(|| values.get(fallback))
}

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Resolve the specified values for one element.
///
/// Every rule with at least one matching selector contributes its
/// declarations. Rules are applied in ascending specificity, so a more
/// specific rule overwrites a less specific one. The sort is stable:
/// rules of equal specificity apply in document order and the later one
/// wins.
#[must_use]
pub fn resolve(element: &ElementData, stylesheet: &Stylesheet) -> PropertyMap {
    let mut matched: Vec<MatchedRule<'_>> = stylesheet
        .rules
        .iter()
        .filter_map(|rule| {
            rule.matching_specificity(element)
                .map(|specificity| MatchedRule { specificity, rule })
        })
        .collect();

    // "Declarations from style rules with higher specificity win"
    matched.sort_by(|a, b| a.specificity.cmp(&b.specificity));

    log::trace!("<{}> matched {} rules", element.tag_name, matched.len());

    let mut values = PropertyMap::new();
    for MatchedRule { rule, .. } in matched {
        for declaration in &rule.declarations {
            let _ = values.insert(declaration.name.clone(), declaration.value.clone());
        }
    }
    values
}

/// Resolve specified values for a whole tree, depth-first.
///
/// Consumes the markup tree: each node's payload moves into the styled
/// node that replaces it.
#[must_use]
pub fn resolve_tree(root: Node, stylesheet: &Stylesheet) -> StyledNode {
    let (node, children) = root.into_parts();
    let specified_values = match &node {
        NodeKind::Element(data) => resolve(data, stylesheet),
        NodeKind::Text(_) => PropertyMap::new(),
    };
    let children = children
        .into_iter()
        .map(|child| resolve_tree(child, stylesheet))
        .collect();
    StyledNode {
        node,
        specified_values,
        children,
    }
}

/// Render a styled tree as one node per line with its specified values,
/// sorted by property name.
#[must_use]
pub fn dump_styled_tree(root: &StyledNode) -> String {
    let mut out = String::new();
    dump_styled_node(root, 0, &mut out);
    out
}

fn dump_styled_node(styled: &StyledNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", styled.node.label());
    if !styled.specified_values.is_empty() {
        let mut names: Vec<&String> = styled.specified_values.keys().collect();
        names.sort();
        let declarations: Vec<String> = names
            .into_iter()
            .map(|name| format!("{name}: {}", styled.specified_values[name]))
            .collect();
        let _ = write!(out, " {{ {} }}", declarations.join("; "));
    }
    out.push('\n');
    for child in &styled.children {
        dump_styled_node(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use lantern_dom::AttributesMap;

    use super::*;
    use crate::parser::parse_stylesheet;

    #[test]
    fn test_lookup_prefers_longhand() {
        let mut values = PropertyMap::new();
        let _ = values.insert("margin".to_string(), Value::px(4.0));
        assert_eq!(lookup(&values, "margin-left", "margin"), Some(&Value::px(4.0)));
        let _ = values.insert("margin-left".to_string(), Value::px(9.0));
        assert_eq!(lookup(&values, "margin-left", "margin"), Some(&Value::px(9.0)));
        assert_eq!(lookup(&values, "padding-left", "padding"), None);
    }

    #[test]
    fn test_text_nodes_get_empty_maps() {
        let sheet = parse_stylesheet("* { color: red }").unwrap();
        let tree = Node::element("p", AttributesMap::new(), vec![Node::text("hi")]);
        let styled = resolve_tree(tree, &sheet);
        assert_eq!(styled.specified_values.len(), 1);
        assert!(styled.children[0].specified_values.is_empty());
    }

    #[test]
    fn test_dump_sorts_properties() {
        let sheet = parse_stylesheet("p { width: 10px; display: block }").unwrap();
        let tree = Node::element("p", AttributesMap::new(), vec![]);
        let dump = dump_styled_tree(&resolve_tree(tree, &sheet));
        assert_eq!(dump, "<p> { display: block; width: 10px }\n");
    }
}
