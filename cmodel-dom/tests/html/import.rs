//! Import tests (HTML → content model)

use crate::common::{blocks, list_items, paragraph, table, texts};
use cmodel_dom::format::SegmentFormat;
use cmodel_dom::model::{Block, ListType, Segment};
use cmodel_dom::{html_to_model, DarkColorRegistry, EditorContext};

#[test]
fn test_heading_and_paragraph() {
    let blocks = blocks("<h1>Title</h1><p>Body text</p>");
    assert_eq!(blocks.len(), 2);

    let heading = paragraph(&blocks[0]);
    assert_eq!(heading.decorator.as_ref().map(|d| d.tag_name.as_str()), Some("h1"));
    assert_eq!(texts(heading), ["Title"]);
    assert_eq!(heading.segments[0].format().bold.bold, Some(true));

    let body = paragraph(&blocks[1]);
    assert_eq!(body.decorator.as_ref().map(|d| d.tag_name.as_str()), Some("p"));
    assert_eq!(body.format.margin.margin_top.as_deref(), Some("1em"));
    assert!(!body.is_implicit);
}

#[test]
fn test_loose_text_gets_implicit_paragraph() {
    let blocks = blocks("before<div>inside</div>after");
    let paragraphs: Vec<_> = blocks.iter().map(paragraph).collect();
    assert_eq!(paragraphs.len(), 3);
    assert!(paragraphs[0].is_implicit);
    assert!(!paragraphs[1].is_implicit);
    assert!(paragraphs[2].is_implicit);
    assert_eq!(texts(paragraphs[2]), ["after"]);
}

#[test]
fn test_inline_formats_stack() {
    let blocks = blocks(r#"<p><b>bold <i>both</i></b> <u>under</u></p>"#);
    let segments = &paragraph(&blocks[0]).segments;
    let formats: Vec<&SegmentFormat> = segments.iter().map(Segment::format).collect();

    assert_eq!(formats[0].bold.bold, Some(true));
    assert_eq!(formats[0].italic.italic, None);
    assert_eq!(formats[1].bold.bold, Some(true));
    assert_eq!(formats[1].italic.italic, Some(true));
    assert_eq!(formats.last().and_then(|f| f.underline.underline), Some(true));
}

#[test]
fn test_link_and_dataset() {
    let blocks = blocks(r#"<p><a href="https://example.com" target="_blank" data-kind="ext">go</a></p>"#);
    let Segment::Text(text) = &paragraph(&blocks[0]).segments[0] else {
        panic!("expected text");
    };
    let link = text.link.as_ref().expect("link");
    assert_eq!(link.format.link.href.as_deref(), Some("https://example.com"));
    assert_eq!(link.format.link.target.as_deref(), Some("_blank"));
    assert_eq!(link.dataset.get("kind"), Some("ext"));
}

#[test]
fn test_anchor_without_href_is_plain_text() {
    let blocks = blocks("<p><a>plain</a></p>");
    let Segment::Text(text) = &paragraph(&blocks[0]).segments[0] else {
        panic!("expected text");
    };
    assert!(text.link.is_none());
}

#[test]
fn test_nested_lists_are_flattened() {
    let document = html_to_model(
        r#"<ol start="4"><li>a<ul><li>b</li></ul></li><li>c</li></ol>"#,
        None,
    );
    let items = list_items(&document);
    let shape: Vec<Vec<ListType>> = items
        .iter()
        .map(|item| item.levels.iter().map(|level| level.list_type).collect())
        .collect();
    assert_eq!(
        shape,
        [
            vec![ListType::Ol],
            vec![ListType::Ol, ListType::Ul],
            vec![ListType::Ol],
        ]
    );
    assert_eq!(
        items[0].levels[0].format.list_level_thread.start_number_override,
        Some(4)
    );
    assert_eq!(
        items[2].levels[0].format.list_level_thread.start_number_override,
        None
    );
}

#[test]
fn test_table_grid() {
    let blocks = blocks(
        r#"<table><tr><th colspan="2">head</th></tr><tr><td rowspan="2">a</td><td>b</td></tr><tr><td>c</td></tr></table>"#,
    );
    let table = table(&blocks[0]);
    let shape: Vec<Vec<(bool, bool, bool)>> = table
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| (cell.is_header, cell.span_left, cell.span_above))
                .collect()
        })
        .collect();
    assert_eq!(
        shape,
        [
            vec![(true, false, false), (true, true, false)],
            vec![(false, false, false), (false, false, false)],
            vec![(false, false, true), (false, false, false)],
        ]
    );
}

#[test]
fn test_block_entity() {
    let blocks = blocks(
        r#"<div class="_Entity _EType_chart _EId_e1 _EReadonly_1" contenteditable="false"><canvas></canvas></div>"#,
    );
    let Block::Entity(entity) = &blocks[0] else {
        panic!("expected entity, got {:?}", blocks[0]);
    };
    assert!(entity.is_block);
    assert_eq!(entity.format.entity_type.as_deref(), Some("chart"));
    assert_eq!(entity.format.id.as_deref(), Some("e1"));
    assert_eq!(entity.format.is_readonly, Some(true));
    assert_eq!(entity.html, "<canvas></canvas>");
}

#[test]
fn test_preformatted_whitespace_is_kept() {
    let blocks = blocks("<pre>a  b\n c</pre><p>a   b</p>");
    let Block::FormatContainer(pre) = &blocks[0] else {
        panic!("expected a format container, got {:?}", blocks[0]);
    };
    assert_eq!(pre.tag_name, "pre");
    assert_eq!(texts(paragraph(&pre.blocks[0])), ["a  b\n c"]);
    assert_eq!(texts(paragraph(&blocks[1])), ["a b"]);
}

#[test]
fn test_scripts_and_styles_are_ignored() {
    let blocks = blocks("<style>p { color: red }</style><script>alert(1)</script><p>x</p>");
    assert_eq!(blocks.len(), 1);
    assert_eq!(texts(paragraph(&blocks[0])), ["x"]);
}

#[test]
fn test_default_format_is_recorded() {
    let mut format = SegmentFormat::default();
    format.font_family.font_family = Some("Calibri".to_string());
    let document = html_to_model("<p>x</p>", Some(EditorContext::new().with_default_format(format)));
    assert_eq!(document.format.font_family.font_family.as_deref(), Some("Calibri"));
}

#[test]
fn test_unknown_dark_color_is_dropped() {
    let registry = std::rc::Rc::new(std::cell::RefCell::new(DarkColorRegistry::default()));
    let document = html_to_model(
        r#"<p><span style="color: rgb(10, 20, 30)">x</span></p>"#,
        Some(EditorContext::new().with_dark_mode(registry)),
    );
    let blocks = document.blocks;
    assert_eq!(paragraph(&blocks[0]).segments[0].format().text_color.text_color, None);
}
