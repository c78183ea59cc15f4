//! Box model and attribute handlers shared by most categories.

use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::DefaultStyle;
use crate::dom::style::split_tokens;
use crate::dom::{
    dataset, get_attribute, get_style, set_attribute, set_dataset_value, set_style, tag_name,
};
use crate::format::slices::*;
use crate::format::FormatHandler;
use crate::utils::unit::{format_px, parse_value_with_unit, ResultUnit, UnitBase};
use markup5ever_rcdom::Handle;

const MARGIN_PROPERTIES: [&str; 4] = ["margin-top", "margin-right", "margin-bottom", "margin-left"];
const PADDING_PROPERTIES: [&str; 4] = [
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
];
const BORDER_PROPERTIES: [&str; 4] = ["border-top", "border-right", "border-bottom", "border-left"];
const RADIUS_PROPERTIES: [&str; 4] = [
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
];

/// Default browser indentation of `ol`/`ul`.
const LIST_INDENTATION: &str = "40px";

fn margins_mut(format: &mut MarginFormat) -> [&mut Option<String>; 4] {
    [
        &mut format.margin_top,
        &mut format.margin_right,
        &mut format.margin_bottom,
        &mut format.margin_left,
    ]
}

fn margins(format: &MarginFormat) -> [&Option<String>; 4] {
    [
        &format.margin_top,
        &format.margin_right,
        &format.margin_bottom,
        &format.margin_left,
    ]
}

fn paddings_mut(format: &mut PaddingFormat) -> [&mut Option<String>; 4] {
    [
        &mut format.padding_top,
        &mut format.padding_right,
        &mut format.padding_bottom,
        &mut format.padding_left,
    ]
}

fn paddings(format: &PaddingFormat) -> [&Option<String>; 4] {
    [
        &format.padding_top,
        &format.padding_right,
        &format.padding_bottom,
        &format.padding_left,
    ]
}

fn borders_mut(format: &mut BorderFormat) -> [&mut Option<String>; 4] {
    [
        &mut format.border_top,
        &mut format.border_right,
        &mut format.border_bottom,
        &mut format.border_left,
    ]
}

fn radii_mut(format: &mut BorderFormat) -> [&mut Option<String>; 4] {
    [
        &mut format.border_top_left_radius,
        &mut format.border_top_right_radius,
        &mut format.border_bottom_left_radius,
        &mut format.border_bottom_right_radius,
    ]
}

/// Padding property on the side lists indent from.
pub(crate) fn start_padding_property(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Rtl) => "padding-right",
        _ => "padding-left",
    }
}

pub const BACKGROUND_COLOR_HANDLER: FormatHandler<BackgroundColorFormat> = FormatHandler {
    parse: parse_background_color,
    apply: apply_background_color,
};

fn parse_background_color(
    format: &mut BackgroundColorFormat,
    element: &Handle,
    context: &mut DomToModelContext,
    _default_style: &DefaultStyle,
) {
    if let Some(color) = context
        .color(element, true)
        .filter(|color| color != "transparent")
    {
        format.background_color = Some(color);
    }
}

fn apply_background_color(
    format: &BackgroundColorFormat,
    element: &Handle,
    context: &mut ModelToDomContext,
) {
    if let Some(color) = &format.background_color {
        context.write_color(element, color, true);
    }
}

pub const MARGIN_HANDLER: FormatHandler<MarginFormat> = FormatHandler {
    parse: parse_margin,
    apply: apply_margin,
};

/// Top and bottom margins are taken as written. Left and right margins add up with a value
/// already in the format, so nested indentation compounds.
fn parse_margin(
    format: &mut MarginFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    for (property, slot) in MARGIN_PROPERTIES.iter().zip(margins_mut(format)) {
        let Some(value) = get_style(element, property)
            .or_else(|| default_style.get(property).map(str::to_string))
        else {
            continue;
        };

        *slot = match (*property, slot.take()) {
            ("margin-left" | "margin-right", Some(existing)) => {
                let base = Some(UnitBase::Element(element));
                let sum = parse_value_with_unit(&existing, base, ResultUnit::Px)
                    + parse_value_with_unit(&value, base, ResultUnit::Px);
                Some(format_px(sum))
            }
            _ => Some(value),
        };
    }
}

fn apply_margin(format: &MarginFormat, element: &Handle, context: &mut ModelToDomContext) {
    let implicit = context.implicit_format.margin.clone();
    for ((property, value), implicit) in MARGIN_PROPERTIES
        .iter()
        .zip(margins(format))
        .zip(margins(&implicit))
    {
        if value != implicit {
            set_style(element, property, value.as_deref().unwrap_or("0"));
        }
    }
}

pub const PADDING_HANDLER: FormatHandler<PaddingFormat> = FormatHandler {
    parse: parse_padding,
    apply: apply_padding,
};

fn parse_padding(
    format: &mut PaddingFormat,
    element: &Handle,
    context: &mut DomToModelContext,
    default_style: &DefaultStyle,
) {
    let start_side = start_padding_property(context.current_direction);
    for (property, slot) in PADDING_PROPERTIES.iter().zip(paddings_mut(format)) {
        let Some(value) = get_style(element, property) else {
            continue;
        };
        let default_value = if *property == start_side {
            default_style.padding_inline_start.unwrap_or("0px")
        } else {
            "0px"
        };
        let base = Some(UnitBase::Element(element));
        if parse_value_with_unit(&value, base, ResultUnit::Px)
            != parse_value_with_unit(default_value, base, ResultUnit::Px)
        {
            *slot = Some(value);
        }
    }
}

fn apply_padding(format: &PaddingFormat, element: &Handle, context: &mut ModelToDomContext) {
    let is_list = matches!(tag_name(element).as_deref(), Some("ol" | "ul"));
    let start_side = start_padding_property(context.current_direction);
    for (property, value) in PADDING_PROPERTIES.iter().zip(paddings(format)) {
        let Some(value) = value else {
            continue;
        };
        if is_list && *property == start_side && value == LIST_INDENTATION {
            continue;
        }
        set_style(element, property, value);
    }
}

pub const BORDER_HANDLER: FormatHandler<BorderFormat> = FormatHandler {
    parse: parse_border,
    apply: apply_border,
};

fn is_zero_width(width: &str) -> bool {
    width
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .parse::<f64>()
        .map(|number| number == 0.0)
        .unwrap_or(false)
}

/// A side is kept when it draws something: a style or color, and a width that is not zero.
/// `none` records an empty value, which removes the border when applied.
fn parse_border(
    format: &mut BorderFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    _default_style: &DefaultStyle,
) {
    for (property, slot) in BORDER_PROPERTIES.iter().zip(borders_mut(format)) {
        let Some(value) = get_style(element, property) else {
            continue;
        };
        if split_tokens(&value).iter().any(|token| token == "none") {
            *slot = Some(String::new());
            continue;
        }
        let has_paint = get_style(element, &format!("{property}-style")).is_some()
            || get_style(element, &format!("{property}-color")).is_some();
        let zero_width = get_style(element, &format!("{property}-width"))
            .map(|width| is_zero_width(&width))
            .unwrap_or(false);
        if has_paint && !zero_width {
            *slot = Some(value);
        }
    }

    if let Some(radius) = get_style(element, "border-radius") {
        format.border_radius = Some(radius);
    } else {
        for (property, slot) in RADIUS_PROPERTIES.iter().zip(radii_mut(format)) {
            if let Some(radius) = get_style(element, property) {
                *slot = Some(radius);
            }
        }
    }
}

fn apply_border(format: &BorderFormat, element: &Handle, _context: &mut ModelToDomContext) {
    let sides = [
        &format.border_top,
        &format.border_right,
        &format.border_bottom,
        &format.border_left,
    ];
    for (property, value) in BORDER_PROPERTIES.iter().zip(sides) {
        if let Some(value) = value {
            set_style(element, property, value);
        }
    }

    if let Some(radius) = &format.border_radius {
        set_style(element, "border-radius", radius);
    } else {
        let corners = [
            &format.border_top_left_radius,
            &format.border_top_right_radius,
            &format.border_bottom_left_radius,
            &format.border_bottom_right_radius,
        ];
        for (property, value) in RADIUS_PROPERTIES.iter().zip(corners) {
            if let Some(value) = value {
                set_style(element, property, value);
            }
        }
    }
}

pub const BORDER_BOX_HANDLER: FormatHandler<BorderBoxFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if get_style(element, "box-sizing").as_deref() == Some("border-box") {
            format.use_border_box = Some(true);
        }
    },
    apply: |format, element, _| {
        if format.use_border_box == Some(true) {
            set_style(element, "box-sizing", "border-box");
        }
    },
};

pub const BOX_SHADOW_HANDLER: FormatHandler<BoxShadowFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(shadow) = get_style(element, "box-shadow") {
            format.box_shadow = Some(shadow);
        }
    },
    apply: |format, element, _| {
        if let Some(shadow) = &format.box_shadow {
            set_style(element, "box-shadow", shadow);
        }
    },
};

pub const DISPLAY_HANDLER: FormatHandler<DisplayFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(display) = get_style(element, "display") {
            format.display = Some(display);
        }
    },
    apply: |format, element, _| {
        if let Some(display) = &format.display {
            set_style(element, "display", display);
        }
    },
};

pub const FLOAT_HANDLER: FormatHandler<FloatFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(float) = get_style(element, "float") {
            format.float = Some(float);
        }
    },
    apply: |format, element, _| {
        if let Some(float) = &format.float {
            set_style(element, "float", float);
        }
    },
};

pub const ID_HANDLER: FormatHandler<IdFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(id) = get_attribute(element, "id").filter(|id| !id.is_empty()) {
            format.id = Some(id);
        }
    },
    apply: |format, element, _| {
        if let Some(id) = &format.id {
            set_attribute(element, "id", id);
        }
    },
};

pub const SIZE_HANDLER: FormatHandler<SizeFormat> = FormatHandler {
    parse: parse_size,
    apply: apply_size,
};

/// `width`/`height` attributes: a bare number means px.
fn size_attribute(element: &Handle, name: &str) -> Option<String> {
    let value = get_attribute(element, name)?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else if value.parse::<f64>().is_ok() {
        Some(format!("{value}px"))
    } else {
        Some(value.to_string())
    }
}

fn parse_size(
    format: &mut SizeFormat,
    element: &Handle,
    _context: &mut DomToModelContext,
    _default_style: &DefaultStyle,
) {
    if let Some(width) =
        get_style(element, "width").or_else(|| size_attribute(element, "width"))
    {
        format.width = Some(width);
    }
    if let Some(height) =
        get_style(element, "height").or_else(|| size_attribute(element, "height"))
    {
        format.height = Some(height);
    }
    for (property, slot) in [
        ("max-width", &mut format.max_width),
        ("max-height", &mut format.max_height),
        ("min-width", &mut format.min_width),
        ("min-height", &mut format.min_height),
    ] {
        if let Some(value) = get_style(element, property) {
            *slot = Some(value);
        }
    }
}

fn apply_size(format: &SizeFormat, element: &Handle, _context: &mut ModelToDomContext) {
    for (property, value) in [
        ("width", &format.width),
        ("height", &format.height),
        ("max-width", &format.max_width),
        ("max-height", &format.max_height),
        ("min-width", &format.min_width),
        ("min-height", &format.min_height),
    ] {
        if let Some(value) = value {
            set_style(element, property, value);
        }
    }
}

pub const DATASET_HANDLER: FormatHandler<DatasetFormat> = FormatHandler {
    parse: |format, element, _, _| {
        for (key, value) in dataset(element) {
            format.insert(key, value);
        }
    },
    apply: |format, element, _| {
        for (key, value) in &format.0 {
            set_dataset_value(element, key, value);
        }
    },
};
