use crate::dom::{get_attribute, get_style, set_style};
use crate::format::slices::*;
use crate::format::FormatHandler;

pub const TABLE_LAYOUT_HANDLER: FormatHandler<TableLayoutFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(layout) = get_style(element, "table-layout") {
            format.table_layout = Some(layout);
        }
    },
    apply: |format, element, _| {
        if let Some(layout) = &format.table_layout {
            set_style(element, "table-layout", layout);
        }
    },
};

/// `border-collapse`, read from inline style only so the `table` default does not leak in.
pub const TABLE_SPACING_HANDLER: FormatHandler<SpacingFormat> = FormatHandler {
    parse: |format, element, _, _| match get_style(element, "border-collapse").as_deref() {
        Some("collapse") => format.border_collapse = Some(true),
        Some("separate") => format.border_separate = Some(true),
        _ => {}
    },
    apply: |format, element, _| {
        if format.border_collapse == Some(true) {
            set_style(element, "border-collapse", "collapse");
        } else if format.border_separate == Some(true) {
            set_style(element, "border-collapse", "separate");
        }
    },
};

/// Cell vertical alignment, from `vertical-align` or the legacy `valign` attribute.
pub const VERTICAL_ALIGN_HANDLER: FormatHandler<VerticalAlignFormat> = FormatHandler {
    parse: |format, element, _, _| {
        let value = get_style(element, "vertical-align").or_else(|| get_attribute(element, "valign"));
        let align = match value.as_deref().map(str::trim) {
            Some("top") => Some(VerticalAlign::Top),
            Some("middle" | "center") => Some(VerticalAlign::Middle),
            Some("bottom") => Some(VerticalAlign::Bottom),
            _ => None,
        };
        if align.is_some() {
            format.vertical_align = align;
        }
    },
    apply: |format, element, _| {
        if let Some(align) = format.vertical_align {
            set_style(element, "vertical-align", align.as_str());
        }
    },
};
