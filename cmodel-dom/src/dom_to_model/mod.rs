//! DOM to Content Model
//!
//!     Walks a DOM subtree and builds the block/segment tree. Every element is routed through an
//!     [`ElementProcessor`] looked up by tag name. Processors own the tree shape (which node an
//!     element becomes); the format parsers of the element's category own the format payload.
//!
//!     Processor keys:
//!         - a lower-case tag name (`p`, `ol`, `td`, ...)
//!         - `element`: dispatch of every element, picks one of the keys below
//!         - `child`: walks the child nodes of an element
//!         - `#text`: text nodes
//!         - `entity`: elements carrying the `_Entity` class
//!         - `*`: any tag without a processor of its own, routed on its `display`
//!
//!     Callers replace processors through [`DomToModelOption::processor_override`]
//!     (crate::context::DomToModelOption).

mod block;
mod list;
mod segment;
mod table;

use crate::context::DomToModelContext;
use crate::dom::{child_nodes, class_list, is_element, tag_name};
use crate::model::{normalize, Block, Document, Paragraph, Segment};
use crate::utils::entity_class::ENTITY_INFO_NAME;
use markup5ever_rcdom::{Handle, NodeData};
use std::collections::BTreeMap;

pub use block::{block_processor, container_processor, divider_processor, entity_processor};
pub use list::{list_item_processor, list_processor};
pub use segment::{
    br_processor, code_processor, generic_processor, image_processor, link_processor,
    segment_processor, text_processor,
};
pub use table::table_processor;

/// Turns one DOM node into blocks (or segments of the last paragraph) of `group`.
pub type ElementProcessor = fn(&mut Vec<Block>, &Handle, &mut DomToModelContext);

/// Processors by key. Always holds every built-in key.
#[derive(Clone)]
pub struct ElementProcessorMap {
    processors: BTreeMap<String, ElementProcessor>,
}

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "center", "dd", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "main", "nav", "p",
    "section",
];

const SEGMENT_TAGS: &[&str] = &[
    "b", "del", "em", "font", "i", "ins", "s", "span", "strike", "strong", "sub", "sup", "u",
];

const IGNORED_TAGS: &[&str] = &[
    "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

fn ignore_processor(_: &mut Vec<Block>, _: &Handle, _: &mut DomToModelContext) {}

impl Default for ElementProcessorMap {
    fn default() -> Self {
        let mut processors: BTreeMap<String, ElementProcessor> = BTreeMap::new();
        let mut add = |keys: &[&str], processor: ElementProcessor| {
            for key in keys {
                processors.insert(key.to_string(), processor);
            }
        };

        add(&["element"], element_processor);
        add(&["child"], child_processor);
        add(&["#text"], text_processor);
        add(&["entity"], entity_processor);
        add(&["*"], generic_processor);
        add(BLOCK_TAGS, block_processor);
        add(SEGMENT_TAGS, generic_processor);
        add(IGNORED_TAGS, ignore_processor);
        add(&["a"], link_processor);
        add(&["code"], code_processor);
        add(&["br"], br_processor);
        add(&["img"], image_processor);
        add(&["ol", "ul"], list_processor);
        add(&["li"], list_item_processor);
        add(&["table"], table_processor);
        add(&["hr"], divider_processor);
        add(&["blockquote", "pre"], container_processor);

        ElementProcessorMap { processors }
    }
}

impl ElementProcessorMap {
    /// Built-in processors with `overrides` replacing or adding keys.
    pub fn with_override(overrides: BTreeMap<String, ElementProcessor>) -> Self {
        let mut map = Self::default();
        map.processors.extend(overrides);
        map
    }

    pub fn get(&self, key: &str) -> Option<ElementProcessor> {
        self.processors.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.processors.keys().map(String::as_str)
    }
}

fn processor_for(context: &DomToModelContext, key: &str) -> Option<ElementProcessor> {
    context.settings.element_processors.get(key)
}

/// Convert the children of `root` into a document.
///
/// `root` itself is not converted; pass the `body` (or any container) holding the content.
pub fn dom_to_model(root: &Handle, context: &mut DomToModelContext) -> Document {
    tracing::debug!(dark_mode = context.is_dark_mode, "dom to model pass started");

    let mut blocks = Vec::new();
    process_child_nodes(&mut blocks, root, context);

    let mut document = Document {
        blocks,
        format: context.default_format.clone(),
    };
    normalize(&mut document);

    tracing::debug!(blocks = document.blocks.len(), "dom to model pass finished");
    document
}

/// Run the `child` processor over `parent`.
pub fn process_child_nodes(group: &mut Vec<Block>, parent: &Handle, context: &mut DomToModelContext) {
    let processor = processor_for(context, "child").unwrap_or(child_processor);
    processor(group, parent, context);
}

/// Run the `element` processor on one element.
pub fn process_element(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let processor = processor_for(context, "element").unwrap_or(element_processor);
    processor(group, element, context);
}

/// Default `child` processor: elements go to `element`, text to `#text`, the rest is dropped.
pub fn child_processor(group: &mut Vec<Block>, parent: &Handle, context: &mut DomToModelContext) {
    for child in child_nodes(parent) {
        match &child.data {
            NodeData::Element { .. } => process_element(group, &child, context),
            NodeData::Text { .. } => {
                let processor = processor_for(context, "#text").unwrap_or(text_processor);
                processor(group, &child, context);
            }
            _ => {}
        }
    }
}

/// Default `element` processor: entity wrappers first, then by tag, then `*`.
pub fn element_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    if !is_element(element) {
        return;
    }
    let tag = tag_name(element).unwrap_or_default();
    tracing::trace!(tag = %tag, "processing element");

    let is_entity = class_list(element).iter().any(|class| class == ENTITY_INFO_NAME);
    let processor = if is_entity {
        processor_for(context, "entity")
    } else {
        processor_for(context, &tag)
    };
    let processor = processor
        .or_else(|| processor_for(context, "*"))
        .unwrap_or(generic_processor);
    processor(group, element, context);
}

/// The paragraph new segments go to: the last block of `group` when it is a paragraph, else a
/// new implicit paragraph carrying the current block format.
pub(crate) fn last_paragraph<'a>(
    group: &'a mut Vec<Block>,
    context: &DomToModelContext,
) -> &'a mut Paragraph {
    if !matches!(group.last(), Some(Block::Paragraph(_))) {
        group.push(Block::Paragraph(Paragraph::new(
            context.block_format.clone(),
            true,
        )));
    }
    match group.last_mut() {
        Some(Block::Paragraph(paragraph)) => paragraph,
        _ => unreachable!("a paragraph was just pushed"),
    }
}

pub(crate) fn add_segment(group: &mut Vec<Block>, segment: Segment, context: &DomToModelContext) {
    last_paragraph(group, context).segments.push(segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{create_dom_to_model_context, DomToModelOption};
    use crate::dom::parse_html;
    use crate::format::{Alignment, Direction};
    use crate::model::{ListType, Text};

    fn convert(html: &str) -> Document {
        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        dom_to_model(&parse_html(html), &mut context)
    }

    fn paragraph(block: &Block) -> &Paragraph {
        match block {
            Block::Paragraph(paragraph) => paragraph,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    fn texts(paragraph: &Paragraph) -> Vec<&Text> {
        paragraph
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plain_text_becomes_implicit_paragraph() {
        let document = convert("hello   world");
        assert_eq!(document.blocks.len(), 1);
        let p = paragraph(&document.blocks[0]);
        assert!(p.is_implicit);
        assert_eq!(texts(p)[0].text, "hello world");
    }

    #[test]
    fn test_paragraph_decorator_and_default_margins() {
        let document = convert("<p>one</p><h1>two</h1>");
        assert_eq!(document.blocks.len(), 2);

        let p = paragraph(&document.blocks[0]);
        assert!(!p.is_implicit);
        assert_eq!(p.decorator.as_ref().map(|d| d.tag_name.as_str()), Some("p"));
        assert_eq!(p.format.margin.margin_top.as_deref(), Some("1em"));

        let h1 = paragraph(&document.blocks[1]);
        let decorator = h1.decorator.as_ref().unwrap();
        assert_eq!(decorator.tag_name, "h1");
        assert_eq!(decorator.format.bold.bold, Some(true));
        assert_eq!(texts(h1)[0].format.bold.bold, Some(true));
    }

    #[test]
    fn test_inline_formats_split_text() {
        let document = convert("<div>a<b>b</b><i>c</i></div>");
        let p = paragraph(&document.blocks[0]);
        let texts = texts(p);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[0].format.bold.bold, None);
        assert_eq!(texts[1].format.bold.bold, Some(true));
        assert_eq!(texts[2].format.italic.italic, Some(true));
    }

    #[test]
    fn test_adjacent_text_with_same_format_merges() {
        let document = convert("<div><span>a</span><span>b</span></div>");
        let p = paragraph(&document.blocks[0]);
        assert_eq!(p.segments.len(), 1);
        assert_eq!(texts(p)[0].text, "ab");
    }

    #[test]
    fn test_direction_inherits_into_nested_blocks() {
        let document = convert(r#"<div dir="rtl"><p style="text-align: left">x</p></div>"#);
        let nested = document
            .blocks
            .iter()
            .map(paragraph)
            .find(|p| !p.segments.is_empty())
            .unwrap();
        assert_eq!(nested.format.direction.direction, Some(Direction::Rtl));
        assert_eq!(nested.format.text_align.text_align, Some(Alignment::End));
    }

    #[test]
    fn test_ignored_tags_produce_nothing() {
        let document = convert("<style>p { color: red }</style><script>x()</script><p>kept</p>");
        assert_eq!(document.blocks.len(), 1);
        assert_eq!(texts(paragraph(&document.blocks[0]))[0].text, "kept");
    }

    #[test]
    fn test_processor_override_replaces_tag() {
        fn drop_all(_: &mut Vec<Block>, _: &Handle, _: &mut DomToModelContext) {}

        let mut processor_override = BTreeMap::new();
        processor_override.insert("ul".to_string(), drop_all as ElementProcessor);
        let mut context = create_dom_to_model_context(
            None,
            DomToModelOption {
                processor_override,
                ..Default::default()
            },
        );
        let root = parse_html("<ul><li>a</li></ul><ol><li>b</li></ol>");
        let document = dom_to_model(&root, &mut context);
        assert_eq!(document.blocks.len(), 1);
        match &document.blocks[0] {
            Block::ListItem(item) => assert_eq!(item.levels[0].list_type, ListType::Ol),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_default_map_has_dispatch_keys() {
        let map = ElementProcessorMap::default();
        for key in ["element", "child", "#text", "entity", "*", "p", "li", "table"] {
            assert!(map.get(key).is_some(), "{key}");
        }
        assert!(map.get("td").is_none());
        assert!(map.keys().any(|key| key == "blockquote"));
    }
}
