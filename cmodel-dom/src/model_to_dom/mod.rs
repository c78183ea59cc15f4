//! Content Model to DOM
//!
//!     Walks a content model tree and writes DOM nodes under a parent element. Each node kind has
//!     a model handler creating its elements; the handler runs the appliers of the node's format
//!     category on them. Handlers call each other through the context's [`ModelHandlerMap`], so
//!     replacing one handler changes every place that node kind is written.
//!
//!     While handlers run, the context carries:
//!         - the implicit format of the element being written, so appliers skip values the
//!           element already gets from its tag or an ancestor
//!         - the list node stack and per depth counters, so consecutive list items share list
//!           elements and numbering continues across interrupted lists

mod block;
mod list;
mod segment;
mod table;

use crate::context::ModelToDomContext;
use crate::model::{
    Block, Br, Divider, Document, Entity, FormatContainer, Image, ListItem, Paragraph, Segment,
    Table, Text,
};
use markup5ever_rcdom::Handle;

pub use block::{
    handle_block, handle_block_group_children, handle_divider, handle_entity,
    handle_format_container, handle_paragraph,
};
pub use list::{handle_list, handle_list_item};
pub use segment::{handle_br, handle_image, handle_segment, handle_text};
pub use table::handle_table;

/// Writes one model node under `parent`.
pub type ModelHandler<T> = fn(&T, &Handle, &mut ModelToDomContext);

/// Writes the child blocks of a block group under `parent`.
pub type BlockGroupChildrenHandler = fn(&[Block], &Handle, &mut ModelToDomContext);

macro_rules! model_handlers {
    ($($field:ident: $handler_ty:ty = $handler:path),* $(,)?) => {
        /// Handler of every model node kind.
        #[derive(Clone, Copy)]
        pub struct ModelHandlerMap {
            $(pub $field: $handler_ty,)*
        }

        impl Default for ModelHandlerMap {
            fn default() -> Self {
                ModelHandlerMap {
                    $($field: $handler,)*
                }
            }
        }

        /// Replacements for individual model handlers. `None` keeps the base handler.
        #[derive(Clone, Copy, Default)]
        pub struct ModelHandlerOverride {
            $(pub $field: Option<$handler_ty>,)*
        }

        impl ModelHandlerMap {
            pub fn with_override(self, overrides: &ModelHandlerOverride) -> Self {
                ModelHandlerMap {
                    $($field: overrides.$field.unwrap_or(self.$field),)*
                }
            }
        }
    };
}

model_handlers! {
    block_group_children: BlockGroupChildrenHandler = handle_block_group_children,
    block: ModelHandler<Block> = handle_block,
    paragraph: ModelHandler<Paragraph> = handle_paragraph,
    segment: ModelHandler<Segment> = handle_segment,
    text: ModelHandler<Text> = handle_text,
    br: ModelHandler<Br> = handle_br,
    image: ModelHandler<Image> = handle_image,
    entity: ModelHandler<Entity> = handle_entity,
    list: ModelHandler<ListItem> = handle_list,
    list_item: ModelHandler<ListItem> = handle_list_item,
    table: ModelHandler<Table> = handle_table,
    divider: ModelHandler<Divider> = handle_divider,
    format_container: ModelHandler<FormatContainer> = handle_format_container,
}

/// Write `document` under `parent`.
pub fn model_to_dom(document: &Document, parent: &Handle, context: &mut ModelToDomContext) {
    tracing::debug!(
        blocks = document.blocks.len(),
        dark_mode = context.is_dark_mode,
        "model to dom pass started"
    );
    let handler = context.settings.model_handlers.block_group_children;
    handler(&document.blocks, parent, context);
    tracing::debug!("model to dom pass finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{create_model_to_dom_context, ModelToDomOption};
    use crate::dom::{create_element, serialize_children, set_attribute};
    use crate::model::Paragraph;

    fn render(document: &Document, option: ModelToDomOption) -> String {
        let mut context = create_model_to_dom_context(None, option);
        let root = create_element("div");
        model_to_dom(document, &root, &mut context);
        serialize_children(&root).unwrap()
    }

    fn marked_divider(divider: &Divider, parent: &Handle, _: &mut ModelToDomContext) {
        let hr = create_element(&divider.tag_name);
        set_attribute(&hr, "data-marked", "1");
        crate::dom::append_child(parent, hr);
    }

    #[test]
    fn test_override_replaces_one_handler() {
        let document = Document {
            blocks: vec![
                Block::Divider(Divider {
                    tag_name: "hr".to_string(),
                    format: Default::default(),
                }),
                Block::Paragraph(Paragraph {
                    segments: vec![Segment::Text(Text::new("x", Default::default()))],
                    ..Paragraph::default()
                }),
            ],
            ..Document::default()
        };
        let html = render(
            &document,
            ModelToDomOption {
                model_handler_override: ModelHandlerOverride {
                    divider: Some(marked_divider),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        assert_eq!(html, r#"<hr data-marked="1"><div><span>x</span></div>"#);
    }

    #[test]
    fn test_base_map_is_used() {
        fn skip_paragraph(_: &Paragraph, _: &Handle, _: &mut ModelToDomContext) {}

        let document = Document {
            blocks: vec![Block::Paragraph(Paragraph::default())],
            ..Document::default()
        };
        let base = ModelHandlerMap {
            paragraph: skip_paragraph,
            ..ModelHandlerMap::default()
        };
        let html = render(
            &document,
            ModelToDomOption {
                base_model_handlers: Some(base),
                ..Default::default()
            },
        );
        assert_eq!(html, "");
    }
}
