//! Integration tests for box tree construction and block layout.

use lantern_css::layout::dump_layout_tree;
use lantern_css::{
    BoxDimensions, BoxType, LayoutBox, LayoutError, PropertyMap, Value, build_layout_tree,
    parse_stylesheet, resolve_tree,
};
use lantern_dom::{AttributesMap, ElementData, NodeKind};
use lantern_html::parse_html;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Markup and stylesheet text to an unlaid box tree.
fn box_tree(html: &str, css: &str) -> Result<LayoutBox, LayoutError> {
    let root = parse_html(html).unwrap();
    let sheet = parse_stylesheet(css).unwrap();
    build_layout_tree(resolve_tree(root, &sheet))
}

/// Markup and stylesheet text to a tree laid out in an 800px viewport.
fn laid_out(html: &str, css: &str) -> LayoutBox {
    box_tree(html, css)
        .unwrap()
        .layout(BoxDimensions::viewport(800.0))
}

/// A block box with the given pixel-valued properties.
fn block(props: &[(&str, Value)], children: Vec<LayoutBox>) -> LayoutBox {
    let style: PropertyMap = props
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

fn assert_no_inline_under_block(layout_box: &LayoutBox) {
    if layout_box.box_type == BoxType::Block {
        assert!(
            layout_box
                .children
                .iter()
                .all(|c| c.box_type != BoxType::Inline),
            "block box has a direct inline child"
        );
    }
    for child in &layout_box.children {
        assert_no_inline_under_block(child);
    }
}

// ===== Box tree =====

#[test]
fn test_inline_child_of_block_is_wrapped() {
    let tree = box_tree(
        r#"<div id="a"><p class="x">hi</p></div>"#,
        "#a { display: block; } .x { display: inline; }",
    )
    .unwrap();

    assert_eq!(tree.box_type, BoxType::Block);
    assert_eq!(tree.children.len(), 1);
    let wrapper = &tree.children[0];
    assert_eq!(wrapper.box_type, BoxType::Anonymous);
    assert_eq!(wrapper.children.len(), 1);
    assert_eq!(wrapper.children[0].box_type, BoxType::Inline);
}

#[test]
fn test_consecutive_inlines_share_one_wrapper() {
    let tree = box_tree(
        "<div><span>a</span><em>b</em>text</div>",
        "div { display: block }",
    )
    .unwrap();
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].box_type, BoxType::Anonymous);
    assert_eq!(tree.children[0].children.len(), 3);
    assert_no_inline_under_block(&tree);
}

#[test]
fn test_display_none_prunes_subtree() {
    let tree = box_tree(
        r#"<div><p class="gone"><span>x</span></p><p>kept</p></div>"#,
        "div, p { display: block } .gone { display: none }",
    )
    .unwrap();
    assert_eq!(tree.children.len(), 1);
    // div, the kept p, and the anonymous wrapper around its text.
    assert_eq!(tree.count(), 4);
}

#[test]
fn test_display_none_root_is_fatal() {
    let err = box_tree("<div><p></p></div>", "div { display: none }").unwrap_err();
    assert_eq!(err, LayoutError::DisplayNoneRoot);
}

#[test]
fn test_mixed_content_never_puts_inline_under_block() {
    let tree = box_tree(
        "<div>a<p>b</p>c<span>d</span><section><em>e</em></section></div>",
        "div, p, section { display: block }",
    )
    .unwrap();
    assert_no_inline_under_block(&tree);
}

// ===== Geometry =====

#[test]
fn test_sibling_blocks_stack_by_content_height() {
    let tree = laid_out(
        r#"<div><p id="one"></p><p id="two"></p></div>"#,
        "div, p { display: block } #one { height: 50px } #two { height: 70px }",
    );
    assert_eq!(tree.children[0].dimensions.content.y, 0.0);
    assert_eq!(tree.children[1].dimensions.content.y, 50.0);
    assert_eq!(tree.dimensions.content.height, 120.0);
}

#[test]
fn test_margins_do_not_collapse() {
    let tree = laid_out(
        "<div><p></p><p></p></div>",
        "div, p { display: block } p { margin: 10px; height: 5px }",
    );
    assert_eq!(tree.children[0].dimensions.content.y, 10.0);
    // 10 + 5 + 10 for the first margin box, then the second top margin.
    assert_eq!(tree.children[1].dimensions.content.y, 35.0);
    assert_eq!(tree.dimensions.content.height, 50.0);
}

#[test]
fn test_children_use_parent_content_box() {
    let tree = laid_out(
        "<div><p></p></div>",
        "div, p { display: block } div { padding: 20px; border-width: 5px; width: 300px }",
    );
    let child = &tree.children[0].dimensions;
    assert_eq!(child.content.x, 25.0);
    assert_eq!(child.content.y, 25.0);
    assert_eq!(child.content.width, 300.0);
}

#[test]
fn test_em_lengths_use_default_font_size() {
    let tree = laid_out("<div></div>", "div { display: block; width: 10em; height: 2em }");
    assert_eq!(tree.dimensions.content.width, 160.0);
    assert_eq!(tree.dimensions.content.height, 32.0);
}

#[test]
fn test_inline_boxes_stack_vertically() {
    let tree = laid_out(
        "<div><span></span><span></span></div>",
        "div { display: block } span { height: 10px }",
    );
    let wrapper = &tree.children[0];
    assert_eq!(wrapper.children[0].dimensions.content.y, 0.0);
    assert_eq!(wrapper.children[1].dimensions.content.y, 10.0);
    assert_eq!(wrapper.dimensions.content.height, 20.0);
}

#[test]
fn test_unknown_keywords_resolve_to_zero() {
    let tree = laid_out("<div></div>", "div { display: block; margin-left: inherit }");
    assert_eq!(tree.dimensions.margin.left, 0.0);
    assert_eq!(tree.dimensions.content.width, 800.0);
}

#[test]
fn test_unresolvable_width_and_height_fall_back_to_auto() {
    let tree = laid_out(
        "<div><p></p></div>",
        "div { display: block; width: 50%; height: 50% } p { display: block; height: 12px }",
    );
    assert_eq!(tree.dimensions.content.width, 800.0);
    assert_eq!(tree.dimensions.margin.right, 0.0);
    assert_eq!(tree.dimensions.content.height, 12.0);

    let tree = laid_out("<div></div>", "div { display: block; width: inherit }");
    assert_eq!(tree.dimensions.content.width, 800.0);
}

#[test]
fn test_dump_layout_tree_lists_boxes() {
    let tree = laid_out(
        r#"<div id="a"><p>hi</p></div>"#,
        "#a { display: block; height: 10px }",
    );
    let dump = dump_layout_tree(&tree);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines[0], "Block <div#a> [x=0 y=0 w=800 h=10]");
    assert!(lines[1].starts_with("  Anonymous ["));
    assert!(lines[2].starts_with("    Inline <p> ["));
}

// ===== Properties =====

#[quickcheck]
fn prop_centered_box_splits_margins_evenly(containing: u16, border: u8, padding: u8) -> TestResult {
    let w = f32::from(containing);
    let edges = 2.0 * (f32::from(border) + f32::from(padding));
    if w < 100.0 + edges {
        return TestResult::discard();
    }
    let laid = block(
        &[
            ("width", Value::px(100.0)),
            ("margin-left", Value::keyword("auto")),
            ("margin-right", Value::keyword("auto")),
            ("border-width", Value::px(f32::from(border))),
            ("padding", Value::px(f32::from(padding))),
        ],
        vec![],
    )
    .layout(BoxDimensions::viewport(w));

    let expected = (w - 100.0 - edges) / 2.0;
    TestResult::from_bool(
        laid.dimensions.margin.left == expected && laid.dimensions.margin.right == expected,
    )
}

#[quickcheck]
fn prop_horizontal_edges_sum_to_containing_width(
    containing: u16,
    width: (bool, u16),
    margin_left: (bool, u16),
    margin_right: (bool, u16),
    border: u8,
    padding: u8,
) -> bool {
    let length_or_auto = |(auto, px): (bool, u16)| {
        if auto {
            Value::keyword("auto")
        } else {
            Value::px(f32::from(px))
        }
    };
    let laid = block(
        &[
            ("width", length_or_auto(width)),
            ("margin-left", length_or_auto(margin_left)),
            ("margin-right", length_or_auto(margin_right)),
            ("border-width", Value::px(f32::from(border))),
            ("padding", Value::px(f32::from(padding))),
        ],
        vec![],
    )
    .layout(BoxDimensions::viewport(f32::from(containing)));

    laid.dimensions.content.width >= 0.0
        && laid.dimensions.margin_box().width == f32::from(containing)
}

#[quickcheck]
fn prop_layout_is_idempotent(heights: Vec<(u8, bool)>, containing: u16) -> bool {
    let children = heights
        .iter()
        .map(|&(height, with_margin)| {
            let mut props = vec![("height", Value::px(f32::from(height)))];
            if with_margin {
                props.push(("margin", Value::px(3.0)));
            }
            block(&props, vec![])
        })
        .collect();
    let tree = block(&[], children);
    let cb = BoxDimensions::viewport(f32::from(containing));

    let first = tree.clone().layout(cb);
    let second = tree.layout(cb);
    first == second
}
