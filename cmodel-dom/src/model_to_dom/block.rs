//! Block handlers: block groups, paragraphs, dividers, format containers and entities.

use crate::context::{ModelNodeKind, ModelToDomContext};
use crate::dom::{append_child, create_element, parse_html, set_style, take_children};
use crate::format::apply_format;
use crate::model::{Block, Divider, Entity, FormatContainer, Paragraph};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Write the blocks of a group in order.
///
/// Consecutive list items share the list node stack so they end up in the same list elements.
/// Any other block, and the start of the group, begins with an empty stack.
pub fn handle_block_group_children(
    blocks: &[Block],
    parent: &Handle,
    context: &mut ModelToDomContext,
) {
    let saved = std::mem::take(&mut context.list_format.node_stack);
    let handler = context.settings.model_handlers.block;

    for (index, block) in blocks.iter().enumerate() {
        if index == 0 || !matches!(block, Block::ListItem(_)) {
            context.list_format.node_stack.clear();
        }
        handler(block, parent, context);
    }

    context.list_format.node_stack = saved;
}

pub fn handle_block(block: &Block, parent: &Handle, context: &mut ModelToDomContext) {
    let handlers = context.settings.model_handlers;
    match block {
        Block::Paragraph(paragraph) => (handlers.paragraph)(paragraph, parent, context),
        Block::ListItem(item) => (handlers.list_item)(item, parent, context),
        Block::Table(table) => (handlers.table)(table, parent, context),
        Block::Divider(divider) => (handlers.divider)(divider, parent, context),
        Block::FormatContainer(container) => {
            (handlers.format_container)(container, parent, context)
        }
        Block::Entity(entity) => (handlers.entity)(entity, parent, context),
    }
}

/// Whether a paragraph needs an element of its own.
///
/// An implicit paragraph without a decorator writes its segments straight into the parent,
/// unless its format holds something the parent does not already provide.
fn needs_wrapper(paragraph: &Paragraph, context: &ModelToDomContext) -> bool {
    if !paragraph.is_implicit || paragraph.decorator.is_some() {
        return true;
    }
    let mut format = paragraph.format.clone();
    let implicit = &context.implicit_format;
    if format.white_space.white_space == implicit.white_space {
        format.white_space = Default::default();
    }
    if format.line_height.line_height == implicit.line_height {
        format.line_height = Default::default();
    }
    !format.is_empty()
}

pub fn handle_paragraph(paragraph: &Paragraph, parent: &Handle, context: &mut ModelToDomContext) {
    let segment_handler = context.settings.model_handlers.segment;

    if !needs_wrapper(paragraph, context) {
        for segment in &paragraph.segments {
            segment_handler(segment, parent, context);
        }
        return;
    }

    let settings = Rc::clone(&context.settings);
    let (tag, segment_format) = match &paragraph.decorator {
        Some(decorator) => (decorator.tag_name.as_str(), &decorator.format),
        None => ("div", &paragraph.segment_format),
    };
    let element = create_element(tag);
    append_child(parent, element.clone());

    context.stack_implicit_format(tag, |context| {
        apply_format(&element, &settings.format_appliers.block, &paragraph.format, context);

        let implicit = context.implicit_format.with_segment_format(segment_format);
        context.with_implicit_format(implicit, |context| {
            for segment in &paragraph.segments {
                segment_handler(segment, &element, context);
            }
        });

        apply_format(
            &element,
            &settings.format_appliers.segment_on_block,
            segment_format,
            context,
        );
    });

    context.node_created(ModelNodeKind::Paragraph, &element);
}

pub fn handle_divider(divider: &Divider, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let element = create_element(&divider.tag_name);
    append_child(parent, element.clone());

    context.stack_implicit_format(&divider.tag_name, |context| {
        apply_format(&element, &settings.format_appliers.divider, &divider.format, context);
    });
    context.node_created(ModelNodeKind::Divider, &element);
}

pub fn handle_format_container(
    container: &FormatContainer,
    parent: &Handle,
    context: &mut ModelToDomContext,
) {
    let settings = Rc::clone(&context.settings);
    let element = create_element(&container.tag_name);
    append_child(parent, element.clone());

    context.stack_implicit_format(&container.tag_name, |context| {
        apply_format(&element, &settings.format_appliers.container, &container.format, context);
        (settings.model_handlers.block_group_children)(&container.blocks, &element, context);
    });
    context.node_created(ModelNodeKind::FormatContainer, &element);
}

/// Block and inline entities. The wrapper gets the entity class tokens; a block wrapper spans
/// the full width.
pub fn handle_entity(entity: &Entity, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let wrapper = create_element(if entity.is_block { "div" } else { "span" });
    for child in take_children(&parse_html(&entity.html)) {
        append_child(&wrapper, child);
    }
    append_child(parent, wrapper.clone());

    apply_format(&wrapper, &settings.format_appliers.entity, &entity.format, context);
    if entity.is_block {
        set_style(&wrapper, "width", "100%");
    }
    context.node_created(ModelNodeKind::Entity, &wrapper);
}

#[cfg(test)]
mod tests {
    use crate::context::{create_model_to_dom_context, ModelToDomOption};
    use crate::dom::{create_element, serialize_children};
    use crate::format::{BlockFormat, ContainerFormat, EntityFormat, SegmentFormat};
    use crate::model::*;
    use crate::model_to_dom::model_to_dom;

    fn render(blocks: Vec<Block>) -> String {
        let mut context = create_model_to_dom_context(None, ModelToDomOption::default());
        let root = create_element("div");
        model_to_dom(&Document { blocks, ..Document::default() }, &root, &mut context);
        serialize_children(&root).unwrap()
    }

    fn text(value: &str) -> Segment {
        Segment::Text(Text::new(value, SegmentFormat::default()))
    }

    #[test]
    fn test_implicit_paragraph_has_no_wrapper() {
        let paragraph = Paragraph {
            segments: vec![text("a")],
            ..Paragraph::new(BlockFormat::default(), true)
        };
        assert_eq!(render(vec![Block::Paragraph(paragraph)]), "<span>a</span>");
    }

    #[test]
    fn test_decorated_paragraph_skips_implicit_values() {
        let mut format = BlockFormat::default();
        format.margin.margin_top = Some("1em".to_string());
        format.margin.margin_bottom = Some("1em".to_string());
        let mut bold = SegmentFormat::default();
        bold.bold.bold = Some(true);

        let blocks = vec![
            Block::Paragraph(Paragraph {
                segments: vec![text("p")],
                decorator: Some(ParagraphDecorator {
                    tag_name: "p".to_string(),
                    format: SegmentFormat::default(),
                }),
                ..Paragraph::new(format, false)
            }),
            Block::Paragraph(Paragraph {
                segments: vec![Segment::Text(Text::new("h", bold.clone()))],
                decorator: Some(ParagraphDecorator {
                    tag_name: "h1".to_string(),
                    format: bold,
                }),
                ..Paragraph::new(BlockFormat::default(), false)
            }),
        ];
        assert_eq!(
            render(blocks),
            r#"<p><span>p</span></p><h1 style="margin-top: 0; margin-bottom: 0;"><span>h</span></h1>"#
        );
    }

    #[test]
    fn test_container_and_divider() {
        let mut format = ContainerFormat::default();
        format.margin.margin_top = Some("1em".to_string());
        format.margin.margin_bottom = Some("1em".to_string());
        format.margin.margin_left = Some("40px".to_string());
        format.margin.margin_right = Some("40px".to_string());
        let blocks = vec![
            Block::FormatContainer(FormatContainer {
                tag_name: "blockquote".to_string(),
                blocks: vec![Block::Paragraph(Paragraph {
                    segments: vec![text("q")],
                    ..Paragraph::new(BlockFormat::default(), true)
                })],
                format,
            }),
            Block::Divider(Divider {
                tag_name: "hr".to_string(),
                format: Default::default(),
            }),
        ];
        assert_eq!(
            render(blocks),
            r#"<blockquote><span>q</span></blockquote><hr style="margin-top: 0; margin-bottom: 0;">"#
        );
    }

    #[test]
    fn test_entities() {
        let blocks = vec![Block::Entity(Entity {
            format: EntityFormat {
                id: Some("e1".to_string()),
                entity_type: Some("chart".to_string()),
                is_readonly: Some(true),
                is_fake_entity: None,
            },
            is_block: true,
            html: "<canvas></canvas>".to_string(),
            segment_format: SegmentFormat::default(),
        })];
        assert_eq!(
            render(blocks),
            r#"<div class="_Entity _EType_chart _EId_e1 _EReadonly_1" contenteditable="false" style="width: 100%;"><canvas></canvas></div>"#
        );
    }
}
