//! Direction, alignment and the other paragraph level handlers.

use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::DefaultStyle;
use crate::dom::{get_attribute, get_style, parent_of, set_attribute, set_style, tag_name};
use crate::format::slices::*;
use crate::format::FormatHandler;
use markup5ever_rcdom::Handle;

/// Map a CSS `text-align`/`align` value to a logical alignment.
///
/// `left`/`right` are physical, so they flip under `rtl`. Unknown values yield `None`.
pub fn calc_align(value: &str, direction: Option<Direction>) -> Option<Alignment> {
    let rtl = direction == Some(Direction::Rtl);
    match value.trim().to_ascii_lowercase().as_str() {
        "center" | "-webkit-center" | "-moz-center" => Some(Alignment::Center),
        "left" => Some(if rtl { Alignment::End } else { Alignment::Start }),
        "right" => Some(if rtl { Alignment::Start } else { Alignment::End }),
        "start" | "flex-start" => Some(Alignment::Start),
        "end" | "flex-end" => Some(Alignment::End),
        "justify" => Some(Alignment::Justify),
        "initial" => Some(Alignment::Initial),
        _ => None,
    }
}

/// Physical CSS value for a logical alignment.
pub fn result_align(align: Alignment, direction: Option<Direction>) -> &'static str {
    let rtl = direction == Some(Direction::Rtl);
    match align {
        Alignment::Start if rtl => "right",
        Alignment::Start => "left",
        Alignment::End if rtl => "left",
        Alignment::End => "right",
        Alignment::Center => "center",
        Alignment::Justify => "justify",
        Alignment::Initial => "initial",
    }
}

/// Logical value `align-self` takes in a flex column.
fn flex_align(align: Alignment) -> &'static str {
    match align {
        Alignment::Start => "start",
        Alignment::Center => "center",
        Alignment::End => "end",
        Alignment::Justify => "stretch",
        Alignment::Initial => "initial",
    }
}

/// An `li` laid out by a `display: flex; flex-direction: column` list aligns with `align-self`.
fn is_item_of_flex_column(element: &Handle) -> bool {
    if tag_name(element).as_deref() != Some("li") {
        return false;
    }
    parent_of(element).is_some_and(|list| {
        get_style(&list, "display").as_deref() == Some("flex")
            && get_style(&list, "flex-direction").as_deref() == Some("column")
    })
}

pub const DIRECTION_HANDLER: FormatHandler<DirectionFormat> = FormatHandler {
    parse: parse_direction,
    apply: apply_direction,
};

fn parse_direction(
    format: &mut DirectionFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    _default_style: &DefaultStyle,
) {
    let value = get_style(element, "direction").or_else(|| get_attribute(element, "dir"));
    match value.as_deref().map(str::trim) {
        Some("rtl") => format.direction = Some(Direction::Rtl),
        Some("ltr") => format.direction = Some(Direction::Ltr),
        _ => {}
    }
}

fn apply_direction(format: &DirectionFormat, element: &Handle, _context: &mut ModelToDomContext) {
    if let Some(direction) = format.direction {
        set_style(element, "direction", direction.as_str());
    }
}

pub const TEXT_ALIGN_HANDLER: FormatHandler<TextAlignFormat> = FormatHandler {
    parse: parse_text_align,
    apply: apply_text_align,
};

fn parse_text_align(
    format: &mut TextAlignFormat,
    element: &Handle,
    context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    let property = if is_item_of_flex_column(element) {
        "align-self"
    } else {
        "text-align"
    };
    let value = get_style(element, property)
        .or_else(|| default_style.get(property).map(str::to_string));
    if let Some(align) = value.and_then(|value| calc_align(&value, context.current_direction)) {
        format.text_align = Some(align);
    }
}

fn apply_text_align(format: &TextAlignFormat, element: &Handle, context: &mut ModelToDomContext) {
    let Some(align) = format.text_align else {
        return;
    };
    if is_item_of_flex_column(element) {
        set_style(element, "align-self", flex_align(align));
    } else {
        set_style(
            element,
            "text-align",
            result_align(align, context.current_direction),
        );
    }
}

pub const HTML_ALIGN_HANDLER: FormatHandler<HtmlAlignFormat> = FormatHandler {
    parse: |format, element, context, _| {
        if let Some(align) = get_attribute(element, "align")
            .and_then(|value| calc_align(&value, context.current_direction))
        {
            format.html_align = Some(align);
        }
    },
    apply: |format, element, context| {
        if let Some(align) = format.html_align {
            set_attribute(element, "align", result_align(align, context.current_direction));
        }
    },
};

pub const LINE_HEIGHT_HANDLER: FormatHandler<LineHeightFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        if let Some(value) = get_style(element, "line-height")
            .or_else(|| default_style.get("line-height").map(str::to_string))
            .filter(|value| value != "inherit")
        {
            format.line_height = Some(value);
        }
    },
    apply: |format, element, context| {
        if let Some(value) = &format.line_height {
            if context.implicit_format.line_height.as_ref() != Some(value) {
                set_style(element, "line-height", value);
            }
        }
    },
};

pub const WHITE_SPACE_HANDLER: FormatHandler<WhiteSpaceFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        if let Some(value) = get_style(element, "white-space")
            .or_else(|| default_style.white_space.map(str::to_string))
        {
            format.white_space = Some(value);
        }
    },
    apply: |format, element, context| {
        if let Some(value) = &format.white_space {
            if context.implicit_format.white_space.as_ref() != Some(value) {
                set_style(element, "white-space", value);
            }
        }
    },
};

pub const TEXT_INDENT_HANDLER: FormatHandler<TextIndentFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(value) = get_style(element, "text-indent") {
            format.text_indent = Some(value);
        }
    },
    apply: |format, element, _| {
        if let Some(value) = &format.text_indent {
            set_style(element, "text-indent", value);
        }
    },
};

pub const WORD_BREAK_HANDLER: FormatHandler<WordBreakFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(value) = get_style(element, "word-break") {
            format.word_break = Some(value);
        }
    },
    apply: |format, element, _| {
        if let Some(value) = &format.word_break {
            set_style(element, "word-break", value);
        }
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        create_dom_to_model_context, create_model_to_dom_context, DomToModelOption,
        ModelToDomOption,
    };
    use crate::default_style::default_style_of;
    use crate::dom::{append_child, create_element};

    #[test]
    fn test_calc_align_flips_under_rtl() {
        assert_eq!(calc_align("left", None), Some(Alignment::Start));
        assert_eq!(calc_align("left", Some(Direction::Rtl)), Some(Alignment::End));
        assert_eq!(calc_align("right", Some(Direction::Rtl)), Some(Alignment::Start));
        assert_eq!(calc_align("-webkit-center", None), Some(Alignment::Center));
        assert_eq!(calc_align("justify", Some(Direction::Rtl)), Some(Alignment::Justify));
        assert_eq!(calc_align("sideways", None), None);
    }

    #[test]
    fn test_result_align_inverts_calc_align() {
        for direction in [None, Some(Direction::Ltr), Some(Direction::Rtl)] {
            for value in ["left", "right", "center", "justify"] {
                let align = calc_align(value, direction).unwrap();
                assert_eq!(result_align(align, direction), value);
            }
        }
    }

    #[test]
    fn test_direction_prefers_style_over_attribute() {
        let div = create_element("div");
        set_attribute(&div, "dir", "ltr");
        set_style(&div, "direction", "rtl");
        let mut format = DirectionFormat::default();
        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        (DIRECTION_HANDLER.parse)(&mut format, &div, &mut context, &DefaultStyle::EMPTY);
        assert_eq!(format.direction, Some(Direction::Rtl));
    }

    #[test]
    fn test_direction_ignores_unknown_values() {
        let div = create_element("div");
        set_attribute(&div, "dir", "auto");
        let mut format = DirectionFormat::default();
        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        (DIRECTION_HANDLER.parse)(&mut format, &div, &mut context, &DefaultStyle::EMPTY);
        assert_eq!(format.direction, None);
    }

    #[test]
    fn test_text_align_uses_context_direction() {
        let div = create_element("div");
        set_style(&div, "text-align", "right");
        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        context.current_direction = Some(Direction::Rtl);
        let mut format = TextAlignFormat::default();
        (TEXT_ALIGN_HANDLER.parse)(&mut format, &div, &mut context, &DefaultStyle::EMPTY);
        assert_eq!(format.text_align, Some(Alignment::Start));

        let target = create_element("div");
        let mut apply_context = create_model_to_dom_context(None, ModelToDomOption::default());
        apply_context.current_direction = Some(Direction::Rtl);
        (TEXT_ALIGN_HANDLER.apply)(&format, &target, &mut apply_context);
        assert_eq!(get_style(&target, "text-align").as_deref(), Some("right"));
    }

    #[test]
    fn test_text_align_default_style() {
        let th = create_element("th");
        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        let mut format = TextAlignFormat::default();
        (TEXT_ALIGN_HANDLER.parse)(&mut format, &th, &mut context, default_style_of("th"));
        assert_eq!(format.text_align, Some(Alignment::Center));
    }

    #[test]
    fn test_flex_column_item_uses_align_self() {
        let ul = create_element("ul");
        set_attribute(&ul, "style", "display: flex; flex-direction: column");
        let li = create_element("li");
        append_child(&ul, li.clone());
        set_style(&li, "align-self", "center");

        let mut context = create_dom_to_model_context(None, DomToModelOption::default());
        let mut format = TextAlignFormat::default();
        (TEXT_ALIGN_HANDLER.parse)(&mut format, &li, &mut context, &DefaultStyle::EMPTY);
        assert_eq!(format.text_align, Some(Alignment::Center));

        let target = create_element("li");
        append_child(&ul, target.clone());
        let format = TextAlignFormat {
            text_align: Some(Alignment::End),
        };
        let mut apply_context = create_model_to_dom_context(None, ModelToDomOption::default());
        (TEXT_ALIGN_HANDLER.apply)(&format, &target, &mut apply_context);
        assert_eq!(get_style(&target, "align-self").as_deref(), Some("end"));
        assert_eq!(get_style(&target, "text-align"), None);
    }

    #[test]
    fn test_white_space_skips_implicit_value() {
        let mut context = create_model_to_dom_context(None, ModelToDomOption::default());
        context.implicit_format.white_space = Some("pre".to_string());
        let pre = create_element("pre");
        let format = WhiteSpaceFormat {
            white_space: Some("pre".to_string()),
        };
        (WHITE_SPACE_HANDLER.apply)(&format, &pre, &mut context);
        assert_eq!(get_attribute(&pre, "style"), None);
    }
}
