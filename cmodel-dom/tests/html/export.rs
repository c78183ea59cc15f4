//! Export tests (HTML → content model → HTML)
//!
//! Re-serialized HTML is normalized: every text run gets its own `span`, implied values are
//! left out, and list, table and numbering structure is rebuilt from the model.

use crate::common::roundtrip;
use cmodel_dom::context::{create_model_to_dom_context, ModelNodeKind, ModelToDomOption};
use cmodel_dom::dom::{create_element, serialize_children};
use cmodel_dom::model_to_dom::model_to_dom;
use cmodel_dom::html_to_model;
use insta::assert_snapshot;
use markup5ever_rcdom::Handle;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_paragraph_with_bold() {
    assert_snapshot!(
        roundtrip("<p>Hello <b>world</b></p>", None),
        @"<p><span>Hello </span><span><b>world</b></span></p>"
    );
}

#[test]
fn test_heading_keeps_implied_bold_off_the_text() {
    let html = roundtrip("<h1>Title</h1>", None);
    assert!(html.starts_with("<h1"), "{html}");
    assert!(html.ends_with("><span>Title</span></h1>"), "{html}");
}

#[test]
fn test_nested_lists() {
    assert_snapshot!(
        roundtrip("<ul><li>a<ol><li>b</li></ol></li><li>c</li></ul>", None),
        @"<ul><li><span>a</span><ol><li><span>b</span></li></ol></li><li><span>c</span></li></ul>"
    );
}

#[test]
fn test_interrupted_numbering_continues() {
    assert_snapshot!(
        roundtrip(r#"<ol><li>a</li></ol><p>x</p><ol start="2"><li>b</li></ol>"#, None),
        @r#"<ol><li><span>a</span></li></ol><p><span>x</span></p><ol start="2"><li><span>b</span></li></ol>"#
    );
}

#[test]
fn test_table_spans() {
    assert_snapshot!(
        roundtrip(
            r#"<table><tr><td colspan="2">a</td></tr><tr><td>b</td><td>c</td></tr></table>"#,
            None
        ),
        @r#"<table><tbody><tr><td colspan="2"><span>a</span></td></tr><tr><td><span>b</span></td><td><span>c</span></td></tr></tbody></table>"#
    );
}

#[test]
fn test_containers_and_dividers() {
    assert_snapshot!(
        roundtrip("<blockquote>q</blockquote><hr>", None),
        @"<blockquote><span>q</span></blockquote><hr>"
    );
}

#[test]
fn test_link() {
    assert_snapshot!(
        roundtrip(r#"<p><a href="https://example.com">go</a></p>"#, None),
        @r#"<p><span><a href="https://example.com">go</a></span></p>"#
    );
}

#[test]
fn test_node_created_sees_every_node() {
    let document = html_to_model("<p>a<br>b</p><ul><li>c</li></ul><hr>", None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut context = create_model_to_dom_context(
        None,
        ModelToDomOption {
            on_node_created: Some(Rc::new(move |kind: ModelNodeKind, _node: &Handle| {
                sink.borrow_mut().push(kind)
            })),
            ..Default::default()
        },
    );
    let root = create_element("div");
    model_to_dom(&document, &root, &mut context);
    serialize_children(&root).unwrap();

    assert_eq!(
        *seen.borrow(),
        [
            ModelNodeKind::Text,
            ModelNodeKind::Br,
            ModelNodeKind::Text,
            ModelNodeKind::Paragraph,
            ModelNodeKind::ListLevel,
            ModelNodeKind::Text,
            ModelNodeKind::ListItem,
            ModelNodeKind::Divider,
        ]
    );
}
