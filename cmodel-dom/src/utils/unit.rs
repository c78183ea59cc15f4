//! CSS length parsing and px/pt conversion.

use crate::default_style::default_style_of;
use crate::dom::{get_style, parent_of, tag_name};
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;

static VALUE_WITH_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d+(\.\d+)?)([a-z]+|%)").expect("valid unit regex"));

/// Browser default font size, in px.
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Absolute font size keywords and the point sizes browsers resolve them to.
const KNOWN_FONT_SIZES: [(&str, &str); 8] = [
    ("xx-small", "7.5pt"),
    ("x-small", "10pt"),
    ("small", "12pt"),
    ("medium", "13.5pt"),
    ("large", "18pt"),
    ("x-large", "24pt"),
    ("xx-large", "36pt"),
    ("xxx-large", "48pt"),
];

/// Unit of the number returned by [`parse_value_with_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultUnit {
    #[default]
    Px,
    Pt,
}

/// What relative units (`em`, `ex`, `%`) resolve against.
#[derive(Debug, Clone, Copy)]
pub enum UnitBase<'a> {
    /// Use the element's computed font size (`em`/`ex`) or width (`%`).
    Element(&'a Handle),
    /// Use a known size in px for every relative unit.
    Size(f64),
}

/// Point size for an absolute font size keyword such as `x-large`.
pub fn known_font_size(keyword: &str) -> Option<&'static str> {
    KNOWN_FONT_SIZES
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, size)| *size)
}

pub fn pt_to_px(pt: f64) -> f64 {
    (pt * 4000.0 / 3.0).round() / 1000.0
}

pub fn px_to_pt(px: f64) -> f64 {
    (px * 3000.0 / 4.0).round() / 1000.0
}

/// Parse a CSS length (`12px`, `9pt`, `1.5em`, `2ex`, `50%`) into a number of `result_unit`.
///
/// Relative units need a `base`; without one they resolve to 0. Anything that is not a number
/// followed by a known unit (including a bare number) is 0. Never panics.
pub fn parse_value_with_unit(value: &str, base: Option<UnitBase<'_>>, result_unit: ResultUnit) -> f64 {
    let Some(captures) = VALUE_WITH_UNIT.captures(value) else {
        return 0.0;
    };
    let Some(num) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
        return 0.0;
    };
    let unit = captures.get(3).map(|m| m.as_str()).unwrap_or_default();

    let px = match unit {
        "px" => {
            return match result_unit {
                ResultUnit::Px => num,
                ResultUnit::Pt => px_to_pt(num),
            }
        }
        "pt" => {
            return match result_unit {
                ResultUnit::Px => pt_to_px(num),
                ResultUnit::Pt => num,
            }
        }
        "em" => base.map(font_size_of_base).unwrap_or(0.0) * num,
        "ex" => base.map(font_size_of_base).unwrap_or(0.0) * num / 2.0,
        "%" => base.map(width_of_base).unwrap_or(0.0) * num / 100.0,
        _ => 0.0,
    };

    match result_unit {
        ResultUnit::Px => px,
        ResultUnit::Pt => px_to_pt(px),
    }
}

/// Format a px number as a CSS length, rounded to 3 decimals (`50px`, `20.5px`).
pub fn format_px(px: f64) -> String {
    let rounded = (px * 1000.0).round() / 1000.0;
    format!("{rounded}px")
}

fn font_size_of_base(base: UnitBase<'_>) -> f64 {
    match base {
        UnitBase::Element(element) => computed_font_size(element),
        UnitBase::Size(size) => size,
    }
}

fn width_of_base(base: UnitBase<'_>) -> f64 {
    match base {
        UnitBase::Element(element) => get_style(element, "width")
            .filter(|width| !width.ends_with('%'))
            .map(|width| parse_value_with_unit(&width, None, ResultUnit::Px))
            .unwrap_or(0.0),
        UnitBase::Size(size) => size,
    }
}

/// Font size in px an element renders with: its own inline or tag default size, resolved against
/// its ancestors, falling back to the browser default.
pub fn computed_font_size(element: &Handle) -> f64 {
    let inherited = parent_of(element)
        .filter(|parent| tag_name(parent).is_some())
        .map(|parent| computed_font_size(&parent))
        .unwrap_or(DEFAULT_FONT_SIZE_PX);

    let declared = get_style(element, "font-size").or_else(|| {
        tag_name(element)
            .and_then(|tag| default_style_of(&tag).font_size)
            .map(str::to_string)
    });

    match declared {
        None => inherited,
        Some(size) => resolve_font_size(&size, inherited).unwrap_or(inherited),
    }
}

fn resolve_font_size(size: &str, inherited: f64) -> Option<f64> {
    if let Some(known) = known_font_size(size) {
        return Some(parse_value_with_unit(known, None, ResultUnit::Px));
    }
    match size {
        "smaller" => Some(inherited * 5.0 / 6.0),
        "larger" => Some(inherited * 6.0 / 5.0),
        _ => {
            let px = parse_value_with_unit(size, Some(UnitBase::Size(inherited)), ResultUnit::Px);
            (px > 0.0).then_some(px)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{append_child, create_element, set_style};
    use proptest::prelude::*;

    #[test]
    fn test_px_and_pt() {
        assert_eq!(parse_value_with_unit("16px", None, ResultUnit::Pt), 12.0);
        assert_eq!(parse_value_with_unit("16pt", None, ResultUnit::Pt), 16.0);
        assert_eq!(parse_value_with_unit("12pt", None, ResultUnit::Px), 16.0);
        assert_eq!(parse_value_with_unit("10px", None, ResultUnit::Px), 10.0);
        assert_eq!(parse_value_with_unit("-4px", None, ResultUnit::Px), -4.0);
    }

    #[test]
    fn test_missing_or_unknown_unit() {
        assert_eq!(parse_value_with_unit("", None, ResultUnit::Px), 0.0);
        assert_eq!(parse_value_with_unit("10", None, ResultUnit::Px), 0.0);
        assert_eq!(parse_value_with_unit("10furlong", None, ResultUnit::Px), 0.0);
        assert_eq!(parse_value_with_unit("2em", None, ResultUnit::Px), 0.0);
        assert_eq!(parse_value_with_unit("2rem", None, ResultUnit::Px), 0.0);
        assert_eq!(parse_value_with_unit("1in", Some(UnitBase::Size(16.0)), ResultUnit::Px), 0.0);
    }

    #[test]
    fn test_em_against_element_font() {
        let div = create_element("div");
        set_style(&div, "font-size", "15pt");
        let value = parse_value_with_unit("1em", Some(UnitBase::Element(&div)), ResultUnit::Px);
        assert!((value - 20.0).abs() < 0.01);

        let value = parse_value_with_unit("2ex", Some(UnitBase::Element(&div)), ResultUnit::Px);
        assert!((value - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_em_inherits_from_ancestor() {
        let outer = create_element("div");
        set_style(&outer, "font-size", "20px");
        let inner = create_element("span");
        append_child(&outer, inner.clone());
        assert_eq!(
            parse_value_with_unit("0.5em", Some(UnitBase::Element(&inner)), ResultUnit::Px),
            10.0
        );
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(50.0), "50px");
        assert_eq!(format_px(20.5), "20.5px");
        assert_eq!(format_px(1.0 / 3.0), "0.333px");
    }

    #[test]
    fn test_percent_against_size() {
        assert_eq!(
            parse_value_with_unit("50%", Some(UnitBase::Size(30.0)), ResultUnit::Px),
            15.0
        );
    }

    #[test]
    fn test_computed_font_size_uses_tag_defaults() {
        let h1 = create_element("h1");
        assert_eq!(computed_font_size(&h1), 32.0);
    }

    proptest! {
        #[test]
        fn parse_value_with_unit_never_panics(value in ".*") {
            let _ = parse_value_with_unit(&value, None, ResultUnit::Px);
            let _ = parse_value_with_unit(&value, Some(UnitBase::Size(12.0)), ResultUnit::Pt);
        }
    }
}
