//! Helpers shared by the integration tests.

use cmodel_dom::model::{Block, Document, ListItem, Paragraph, Segment, Table};
use cmodel_dom::{html_to_model, model_to_html, EditorContext};

/// HTML to model and back, with the same editor context both ways.
pub fn roundtrip(html: &str, editor_context: Option<EditorContext>) -> String {
    let document = html_to_model(html, editor_context.clone());
    model_to_html(&document, editor_context).expect("html to serialize")
}

pub fn blocks(html: &str) -> Vec<Block> {
    html_to_model(html, None).blocks
}

pub fn paragraph(block: &Block) -> &Paragraph {
    match block {
        Block::Paragraph(paragraph) => paragraph,
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

pub fn list_items(document: &Document) -> Vec<&ListItem> {
    document
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::ListItem(item) => Some(item),
            _ => None,
        })
        .collect()
}

pub fn table(block: &Block) -> &Table {
    match block {
        Block::Table(table) => table,
        other => panic!("expected a table, got {other:?}"),
    }
}

/// Text of every text segment of a paragraph, in order.
pub fn texts(paragraph: &Paragraph) -> Vec<&str> {
    paragraph
        .segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
        .collect()
}
