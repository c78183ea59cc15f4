//! Character format handlers.
//!
//! Bold, italic, underline, strike and super/subscript are written as wrapper elements
//! (`<b>`, `<i>`, `<u>`, `<s>`, `<sup>`, `<sub>`) rather than inline styles. An explicit "off"
//! value is written as a style so it can override an inherited "on".

use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::DefaultStyle;
use crate::dom::{get_attribute, get_style, set_style, tag_name, wrap_all_child_nodes};
use crate::format::slices::*;
use crate::format::FormatHandler;
use crate::utils::unit::{known_font_size, parse_value_with_unit, ResultUnit, UnitBase};
use markup5ever_rcdom::Handle;

/// Pixel sizes of the legacy `<font size="1..7">` scale.
const FONT_TAG_SIZES: [&str; 7] = ["10px", "13px", "16px", "18px", "24px", "32px", "48px"];

/// Whether a parsed value should be recorded.
///
/// A value equal to `normal` is still recorded when something already set this slice or the
/// tag itself has a default for it, so an explicit reset inside a bold ancestor is kept.
fn should_set_value(
    value: Option<&str>,
    is_normal: impl Fn(&str) -> bool,
    existing: Option<bool>,
    default_value: Option<&str>,
) -> bool {
    match value {
        None | Some("") | Some("inherit") => false,
        Some(value) => !is_normal(value) || existing.is_some() || default_value.is_some(),
    }
}

fn is_normal_weight(value: &str) -> bool {
    matches!(value, "normal" | "400" | "initial")
}

fn is_bold(value: &str) -> bool {
    match value {
        "bold" | "bolder" => true,
        other => other.parse::<u32>().is_ok_and(|weight| weight >= 600),
    }
}

/// Shared apply rule of the tri-state wrapper formats: write when the value differs from the
/// inherited one, or when nothing is inherited and the value is on.
fn needs_write(implicit: Option<bool>, value: Option<bool>) -> bool {
    match implicit {
        Some(_) => implicit != value,
        None => value == Some(true),
    }
}

pub const BOLD_HANDLER: FormatHandler<BoldFormat> = FormatHandler {
    parse: parse_bold,
    apply: apply_bold,
};

fn parse_bold(
    format: &mut BoldFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    let value = get_style(element, "font-weight")
        .or_else(|| default_style.font_weight.map(str::to_string));
    if should_set_value(
        value.as_deref(),
        is_normal_weight,
        format.bold,
        default_style.font_weight,
    ) {
        format.bold = value.as_deref().map(is_bold);
    }
}

fn apply_bold(format: &BoldFormat, element: &Handle, context: &mut ModelToDomContext) {
    if needs_write(context.implicit_format.bold, format.bold) {
        if format.bold == Some(true) {
            wrap_all_child_nodes(element, "b");
        } else {
            set_style(element, "font-weight", "normal");
        }
    }
}

pub const ITALIC_HANDLER: FormatHandler<ItalicFormat> = FormatHandler {
    parse: parse_italic,
    apply: apply_italic,
};

fn parse_italic(
    format: &mut ItalicFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    let value = get_style(element, "font-style")
        .or_else(|| default_style.font_style.map(str::to_string));
    if should_set_value(
        value.as_deref(),
        |value| matches!(value, "normal" | "initial"),
        format.italic,
        default_style.font_style,
    ) {
        format.italic = value
            .as_deref()
            .map(|value| matches!(value, "italic" | "oblique"));
    }
}

fn apply_italic(format: &ItalicFormat, element: &Handle, context: &mut ModelToDomContext) {
    if needs_write(context.implicit_format.italic, format.italic) {
        if format.italic == Some(true) {
            wrap_all_child_nodes(element, "i");
        } else {
            set_style(element, "font-style", "normal");
        }
    }
}

fn text_decoration(element: &Handle, default_style: &DefaultStyle) -> Option<String> {
    get_style(element, "text-decoration")
        .or_else(|| get_style(element, "text-decoration-line"))
        .or_else(|| default_style.text_decoration.map(str::to_string))
}

pub const UNDERLINE_HANDLER: FormatHandler<UnderlineFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        let decoration = text_decoration(element, default_style);
        match decoration.as_deref() {
            Some(value) if value.contains("underline") => format.underline = Some(true),
            Some("none") if tag_name(element).as_deref() == Some("a") => {
                format.underline = Some(false)
            }
            _ => {}
        }
    },
    apply: |format, element, context| {
        let implicit = context.implicit_format.underline.unwrap_or(false);
        let value = format.underline.unwrap_or(false);
        if implicit != value {
            if value {
                wrap_all_child_nodes(element, "u");
            } else {
                set_style(element, "text-decoration", "none");
            }
        }
    },
};

pub const STRIKE_HANDLER: FormatHandler<StrikeFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        if text_decoration(element, default_style)
            .is_some_and(|value| value.contains("line-through"))
        {
            format.strikethrough = Some(true);
        }
    },
    apply: |format, element, _| {
        if format.strikethrough == Some(true) {
            wrap_all_child_nodes(element, "s");
        }
    },
};

pub const FONT_FAMILY_HANDLER: FormatHandler<FontFamilyFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        let value = get_style(element, "font-family")
            .or_else(|| font_tag_attribute(element, "face"))
            .or_else(|| default_style.font_family.map(str::to_string));
        if let Some(value) = value.filter(|value| !value.is_empty() && value != "inherit") {
            format.font_family = Some(value);
        }
    },
    apply: |format, element, context| {
        if let Some(value) = &format.font_family {
            if context.implicit_format.font_family.as_ref() != Some(value) {
                set_style(element, "font-family", value);
            }
        }
    },
};

fn font_tag_attribute(element: &Handle, name: &str) -> Option<String> {
    if tag_name(element).as_deref() == Some("font") {
        get_attribute(element, name)
    } else {
        None
    }
}

/// Resolve `<font size>`: `1`..`7`, or `+n`/`-n` relative to the default size 3.
fn font_tag_size(value: &str) -> Option<String> {
    let value = value.trim();
    let size = if let Some(delta) = value.strip_prefix('+') {
        3 + delta.parse::<i32>().ok()?
    } else if let Some(delta) = value.strip_prefix('-') {
        3 - delta.parse::<i32>().ok()?
    } else {
        value.parse::<i32>().ok()?
    };
    let index = usize::try_from(size.clamp(1, 7) - 1).ok()?;
    FONT_TAG_SIZES.get(index).map(|size| size.to_string())
}

/// Turn a parsed font size into an absolute one.
///
/// Keywords resolve through the known size table. `smaller`, `larger`, `em` and `%` resolve
/// against `context_size`; without one they give `None`.
pub fn normalize_font_size(size: &str, context_size: Option<&str>) -> Option<String> {
    if let Some(known) = known_font_size(size) {
        return Some(known.to_string());
    }
    if size == "inherit" {
        return None;
    }
    if size.ends_with("rem") {
        return Some(size.to_string());
    }
    let relative = matches!(size, "smaller" | "larger") || size.ends_with("em") || size.ends_with('%');
    if !relative {
        return Some(size.to_string());
    }

    let existing = parse_value_with_unit(context_size?, None, ResultUnit::Px);
    if existing == 0.0 {
        return None;
    }
    let px = match size {
        "smaller" => (existing * 500.0 / 6.0).round() / 100.0,
        "larger" => (existing * 600.0 / 5.0).round() / 100.0,
        _ => parse_value_with_unit(size, Some(UnitBase::Size(existing)), ResultUnit::Px),
    };
    Some(format!("{px}px"))
}

pub const FONT_SIZE_HANDLER: FormatHandler<FontSizeFormat> = FormatHandler {
    parse: parse_font_size,
    apply: |format, element, context| {
        if let Some(value) = &format.font_size {
            if context.implicit_format.font_size.as_ref() != Some(value) {
                set_style(element, "font-size", value);
            }
        }
    },
};

fn parse_font_size(
    format: &mut FontSizeFormat,
    element: &Handle,
    context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    let value = get_style(element, "font-size")
        .or_else(|| font_tag_attribute(element, "size").and_then(|size| font_tag_size(&size)))
        .or_else(|| default_style.font_size.map(str::to_string));
    let Some(value) = value else {
        return;
    };
    let context_size = context.segment_format.font_size.font_size.as_deref();
    if let Some(size) = normalize_font_size(&value, context_size) {
        format.font_size = Some(size);
    }
}

pub const TEXT_COLOR_HANDLER: FormatHandler<TextColorFormat> = FormatHandler {
    parse: |format, element, context, _| {
        if let Some(color) = context
            .color(element, false)
            .filter(|color| color != "inherit")
        {
            format.text_color = Some(color);
        }
    },
    apply: |format, element, context| {
        if let Some(color) = &format.text_color {
            if context.implicit_format.text_color.as_ref() != Some(color) {
                context.write_color(element, color, false);
            }
        }
    },
};

pub const LETTER_SPACING_HANDLER: FormatHandler<LetterSpacingFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(value) = get_style(element, "letter-spacing") {
            format.letter_spacing = Some(value);
        }
    },
    apply: |format, element, _| {
        if let Some(value) = &format.letter_spacing {
            set_style(element, "letter-spacing", value);
        }
    },
};

pub const SUPER_OR_SUB_SCRIPT_HANDLER: FormatHandler<SuperOrSubScriptFormat> = FormatHandler {
    parse: |format, element, _, default_style| {
        let value = get_style(element, "vertical-align")
            .or_else(|| default_style.vertical_align.map(str::to_string));
        if let Some(value) = value.filter(|value| value == "super" || value == "sub") {
            let sequence = match format.super_or_sub_script_sequence.take() {
                Some(existing) if !existing.is_empty() => format!("{existing} {value}"),
                _ => value,
            };
            format.super_or_sub_script_sequence = Some(sequence);
        }
    },
    apply: |format, element, _| {
        let Some(sequence) = &format.super_or_sub_script_sequence else {
            return;
        };
        let mut cursor = element.clone();
        for token in sequence.split_whitespace() {
            let tag = match token {
                "super" => "sup",
                "sub" => "sub",
                _ => continue,
            };
            cursor = wrap_all_child_nodes(&cursor, tag);
        }
    },
};
