//! Tree cleanup after parsing.

use super::nodes::{Block, Document, Paragraph, Segment};

/// Remove implicit paragraphs that ended up without segments, at every depth.
///
/// The parser opens an implicit paragraph after each block element so loose inline content has
/// somewhere to go. Most of them stay empty.
pub fn normalize(document: &mut Document) {
    normalize_blocks(&mut document.blocks);
}

fn normalize_blocks(blocks: &mut Vec<Block>) {
    blocks.retain(|block| !matches!(block, Block::Paragraph(paragraph) if is_empty_implicit(paragraph)));
    for block in blocks.iter_mut() {
        match block {
            Block::ListItem(item) => normalize_blocks(&mut item.blocks),
            Block::FormatContainer(container) => normalize_blocks(&mut container.blocks),
            Block::Table(table) => {
                for cell in table.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                    normalize_blocks(&mut cell.blocks);
                }
            }
            Block::Paragraph(paragraph) => trim_trailing_space(paragraph),
            Block::Divider(_) | Block::Entity(_) => {}
        }
    }
}

fn is_empty_implicit(paragraph: &Paragraph) -> bool {
    paragraph.is_implicit && paragraph.segments.is_empty()
}

/// Collapsed whitespace at the end of a paragraph does not render.
fn trim_trailing_space(paragraph: &mut Paragraph) {
    let keeps_space = paragraph
        .format
        .white_space
        .white_space
        .as_deref()
        .is_some_and(|value| value.starts_with("pre"));
    if keeps_space {
        return;
    }
    if let Some(Segment::Text(text)) = paragraph.segments.last_mut() {
        let trimmed = text.text.trim_end_matches(' ').len();
        text.text.truncate(trimmed);
        if text.text.is_empty() {
            paragraph.segments.pop();
        }
    }
}
