//! Block level processors: paragraphs, format containers, dividers and entities.

use super::{add_segment, process_child_nodes};
use crate::context::DomToModelContext;
use crate::default_style::default_style_of;
use crate::dom::{get_style, serialize_children, tag_name};
use crate::format::{parse_format, ContainerFormat, DividerFormat, EntityFormat, SegmentFormat};
use crate::model::{Block, Divider, Entity, FormatContainer, Paragraph, ParagraphDecorator, Segment};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

const DECORATOR_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Whether `element` lays out as a block, from its inline `display` or its tag default.
pub(crate) fn is_block_element(element: &Handle) -> bool {
    match get_style(element, "display") {
        Some(display) => matches!(
            display.as_str(),
            "block" | "flex" | "grid" | "list-item" | "table"
        ),
        None => tag_name(element)
            .map(|tag| default_style_of(&tag).is_block())
            .unwrap_or(false),
    }
}

/// Parse the `segmentOnBlock` category into the inherited segment format.
pub(crate) fn inherit_segment_format(element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let mut segment_format = context.segment_format.clone();
    parse_format(
        element,
        &settings.format_parsers.segment_on_block,
        &mut segment_format,
        context,
    );
    context.segment_format = segment_format;
}

/// A block element written as one paragraph (`p`, `div`, headings, ...).
///
/// Nested blocks end the paragraph: the element's own paragraph is dropped when it got no
/// segments of its own, and loose content after a nested block lands in a new implicit
/// paragraph.
pub fn block_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let tag = tag_name(element).unwrap_or_default();

    context.stack_format(|context| {
        let mut format = context.block_format.inheritable();
        parse_format(element, &settings.format_parsers.block, &mut format, context);
        context.block_format = format.clone();

        let mut own_segment_format = SegmentFormat::default();
        parse_format(
            element,
            &settings.format_parsers.segment_on_block,
            &mut own_segment_format,
            context,
        );
        inherit_segment_format(element, context);

        let mut paragraph = Paragraph::new(format, false);
        if DECORATOR_TAGS.contains(&tag.as_str()) {
            paragraph.decorator = Some(ParagraphDecorator {
                tag_name: tag.clone(),
                format: own_segment_format,
            });
        } else {
            paragraph.segment_format = own_segment_format;
        }

        group.push(Block::Paragraph(paragraph));
        let index = group.len() - 1;
        process_child_nodes(group, element, context);

        let own_is_empty = matches!(&group[index], Block::Paragraph(p) if p.segments.is_empty());
        if own_is_empty && group.len() > index + 1 {
            group.remove(index);
        }
    });

    group.push(Block::Paragraph(Paragraph::new(
        context.block_format.clone(),
        true,
    )));
}

/// `blockquote`, `pre` and other elements kept as a wrapper around their child blocks.
pub fn container_processor(
    group: &mut Vec<Block>,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    let settings = Rc::clone(&context.settings);
    let tag = tag_name(element).unwrap_or_else(|| "div".to_string());

    context.stack_format(|context| {
        let mut format = ContainerFormat::default();
        parse_format(element, &settings.format_parsers.container, &mut format, context);
        inherit_segment_format(element, context);
        context.block_format = format.inheritable_block_format();

        let mut blocks = Vec::new();
        process_child_nodes(&mut blocks, element, context);
        group.push(Block::FormatContainer(FormatContainer {
            tag_name: tag,
            blocks,
            format,
        }));
    });
}

/// `hr`.
pub fn divider_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let mut format = DividerFormat::default();
    parse_format(element, &settings.format_parsers.divider, &mut format, context);
    group.push(Block::Divider(Divider {
        tag_name: tag_name(element).unwrap_or_else(|| "hr".to_string()),
        format,
    }));
}

/// Elements carrying the `_Entity` class. The content is kept as HTML.
pub fn entity_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let mut format = EntityFormat::default();
    parse_format(element, &settings.format_parsers.entity, &mut format, context);

    let html = match serialize_children(element) {
        Ok(html) => html,
        Err(err) => {
            tracing::debug!(error = %err, "dropping entity content");
            String::new()
        }
    };
    let entity = Entity {
        format,
        is_block: is_block_element(element),
        html,
        segment_format: context.segment_format.clone(),
    };

    if entity.is_block {
        group.push(Block::Entity(entity));
    } else {
        add_segment(group, Segment::Entity(entity), context);
    }
}
