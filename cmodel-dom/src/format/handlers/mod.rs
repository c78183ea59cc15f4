//! The built-in format handlers, one per [`FormatKey`](super::FormatKey).
//!
//! Every handler degrades silently: a value it cannot read is not recorded and a value it cannot
//! write is skipped. None of them fails a conversion.

pub mod block;
pub mod common;
pub mod entity;
pub mod link;
pub mod list;
pub mod segment;
pub mod table;

pub use block::{
    calc_align, result_align, DIRECTION_HANDLER, HTML_ALIGN_HANDLER, LINE_HEIGHT_HANDLER,
    TEXT_ALIGN_HANDLER, TEXT_INDENT_HANDLER, WHITE_SPACE_HANDLER, WORD_BREAK_HANDLER,
};
pub use common::{
    BACKGROUND_COLOR_HANDLER, BORDER_BOX_HANDLER, BORDER_HANDLER, BOX_SHADOW_HANDLER,
    DATASET_HANDLER, DISPLAY_HANDLER, FLOAT_HANDLER, ID_HANDLER, MARGIN_HANDLER, PADDING_HANDLER,
    SIZE_HANDLER,
};
pub use entity::ENTITY_HANDLER;
pub use link::LINK_HANDLER;
pub use list::{LIST_LEVEL_THREAD_HANDLER, LIST_STYLE_HANDLER};
pub use segment::{
    BOLD_HANDLER, FONT_FAMILY_HANDLER, FONT_SIZE_HANDLER, ITALIC_HANDLER, LETTER_SPACING_HANDLER,
    STRIKE_HANDLER, SUPER_OR_SUB_SCRIPT_HANDLER, TEXT_COLOR_HANDLER, UNDERLINE_HANDLER,
};
pub use table::{TABLE_LAYOUT_HANDLER, TABLE_SPACING_HANDLER, VERTICAL_ALIGN_HANDLER};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        create_model_to_dom_context, EditorContext, ListNode, ModelToDomContext, ModelToDomOption,
    };
    use crate::dom::{create_element, serialize_node, set_attribute};
    use crate::format::slices::*;
    use crate::format::FormatHandler;
    use crate::model::ListType;
    use crate::utils::DarkColorRegistry;
    use markup5ever_rcdom::Handle;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Markup of `element` after applying `format` once, then after applying it again.
    fn apply_twice<F>(
        handler: FormatHandler<F>,
        format: &F,
        element: &Handle,
        context: &mut ModelToDomContext,
    ) -> (String, String) {
        (handler.apply)(format, element, context);
        let once = serialize_node(element).unwrap();
        (handler.apply)(format, element, context);
        (once, serialize_node(element).unwrap())
    }

    fn styled(tag: &str, style: &str) -> Handle {
        let element = create_element(tag);
        set_attribute(&element, "style", style);
        element
    }

    fn plain_context() -> ModelToDomContext {
        create_model_to_dom_context(None, ModelToDomOption::default())
    }

    #[test]
    fn test_margin_padding_border_apply_once() {
        let mut context = plain_context();

        let margin = MarginFormat {
            margin_top: Some("1px".to_string()),
            margin_left: Some("4px".to_string()),
            ..Default::default()
        };
        let element = styled("div", "margin: 5px");
        let (once, twice) = apply_twice(MARGIN_HANDLER, &margin, &element, &mut context);
        assert_eq!(once, twice);
        assert!(once.contains("margin-top: 1px;"));
        assert!(once.contains("margin-left: 4px;"));

        let padding = PaddingFormat {
            padding_top: Some("2px".to_string()),
            padding_left: Some("40px".to_string()),
            ..Default::default()
        };
        let list = create_element("ol");
        let (once, twice) = apply_twice(PADDING_HANDLER, &padding, &list, &mut context);
        assert_eq!(once, twice);
        assert_eq!(once, r#"<ol style="padding-top: 2px;"></ol>"#);

        let border = BorderFormat {
            border_top: Some("1px solid red".to_string()),
            border_radius: Some("3px".to_string()),
            ..Default::default()
        };
        let element = styled("div", "border: 2px dashed blue");
        let (once, twice) = apply_twice(BORDER_HANDLER, &border, &element, &mut context);
        assert_eq!(once, twice);
        assert!(once.contains("border-top: 1px solid red;"));
        assert!(once.contains("border-radius: 3px;"));
    }

    #[test]
    fn test_direction_and_alignment_apply_once() {
        let mut context = plain_context();
        context.current_direction = Some(Direction::Rtl);

        let direction = DirectionFormat {
            direction: Some(Direction::Rtl),
        };
        let element = create_element("p");
        let (once, twice) = apply_twice(DIRECTION_HANDLER, &direction, &element, &mut context);
        assert_eq!(once, twice);

        let align = TextAlignFormat {
            text_align: Some(Alignment::Start),
        };
        let (once, twice) = apply_twice(TEXT_ALIGN_HANDLER, &align, &element, &mut context);
        assert_eq!(once, twice);
        assert_eq!(once, r#"<p style="direction: rtl; text-align: right;"></p>"#);
    }

    #[test]
    fn test_list_start_applies_once() {
        let mut context = plain_context();
        let list = create_element("ol");
        let stack = [(create_element("div"), None), (list.clone(), Some(ListType::Ol))];
        for (node, list_type) in stack {
            context.list_format.node_stack.push(ListNode {
                node,
                list_type,
                format: Default::default(),
                dataset: Default::default(),
            });
        }
        context.list_format.thread_item_counts = vec![2];

        let (once, twice) = apply_twice(
            LIST_LEVEL_THREAD_HANDLER,
            &ListThreadFormat::default(),
            &list,
            &mut context,
        );
        assert_eq!(once, twice);
        assert_eq!(once, r#"<ol start="3"></ol>"#);
        assert_eq!(context.list_format.thread_item_counts, [2]);
    }

    #[test]
    fn test_dark_colors_apply_once() {
        let registry = Rc::new(RefCell::new(DarkColorRegistry::default()));
        let editor = EditorContext::new().with_dark_mode(registry.clone());
        let mut context = create_model_to_dom_context(Some(editor), ModelToDomOption::default());
        let span = create_element("span");

        let text = TextColorFormat {
            text_color: Some("red".to_string()),
        };
        let (once, twice) = apply_twice(TEXT_COLOR_HANDLER, &text, &span, &mut context);
        assert_eq!(once, twice);

        let background = BackgroundColorFormat {
            background_color: Some("#ffffff".to_string()),
        };
        let (once, twice) = apply_twice(BACKGROUND_COLOR_HANDLER, &background, &span, &mut context);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            r#"<span style="color: var(--darkColor_red, red); background-color: var(--darkColor__ffffff, #ffffff);"></span>"#
        );
        assert_eq!(registry.borrow().registration_count(), 2);
    }
}
