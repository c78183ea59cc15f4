//! Color reading/writing with dark mode support.
//!
//! In dark mode colors are written as `var(--key, lightColor)` and the light/dark pair is
//! recorded in a [`DarkColorHandler`], so reading the element back recovers the light color.

use crate::dom::{get_attribute, get_style, set_style};
use crate::utils::dark_color::{ColorPair, DarkColorHandler};
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;

/// Value written for text colors that used a deprecated system color keyword.
pub const BLACK_COLOR: &str = "rgb(0,0,0)";

/// CSS2 system colors. Browsers no longer resolve these consistently.
const DEPRECATED_COLORS: [&str; 25] = [
    "activeborder",
    "activecaption",
    "appworkspace",
    "background",
    "buttonface",
    "buttonhighlight",
    "buttonshadow",
    "buttontext",
    "captiontext",
    "graytext",
    "highlight",
    "highlighttext",
    "inactiveborder",
    "inactivecaption",
    "inactivecaptiontext",
    "infobackground",
    "infotext",
    "menu",
    "menutext",
    "scrollbar",
    "threeddarkshadow",
    "threedface",
    "threedhighlight",
    "threedlightshadow",
    "windowtext",
];

static HEX3: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([a-fA-F0-9])([a-fA-F0-9])([a-fA-F0-9])$").expect("valid hex3 regex")
});
static HEX6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([a-fA-F0-9]{2})([a-fA-F0-9]{2})([a-fA-F0-9]{2})$").expect("valid hex6 regex")
});
static RGB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*,\s*(\d+(?:\.\d+)?)\s*(?:,\s*(\d+(?:\.\d+)?)\s*)?\)$",
    )
    .expect("valid rgb regex")
});
static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*var\(\s*(\-\-[a-zA-Z0-9\-_]+)\s*(?:,\s*(.*))?\)\s*$")
        .expect("valid variable regex")
});

/// Parse `#rgb`, `#rrggbb`, `rgb(...)` or `rgba(...)` into an RGB triple.
///
/// Alpha is ignored and fractional channels are truncated. Everything else (named colors,
/// 4/8 digit hex, `hsl()`) yields `None`.
pub fn parse_color(color: &str) -> Option<[u32; 3]> {
    let color = color.trim();

    if let Some(m) = HEX3.captures(color) {
        let channel = |i: usize| u32::from_str_radix(&m[i].repeat(2), 16).ok();
        return Some([channel(1)?, channel(2)?, channel(3)?]);
    }
    if let Some(m) = HEX6.captures(color) {
        let channel = |i: usize| u32::from_str_radix(&m[i], 16).ok();
        return Some([channel(1)?, channel(2)?, channel(3)?]);
    }
    if let Some(m) = RGB.captures(color) {
        let channel = |i: usize| {
            m[i].split('.')
                .next()
                .and_then(|whole| whole.parse::<u32>().ok())
        };
        return Some([channel(1)?, channel(2)?, channel(3)?]);
    }
    None
}

/// Read the text or background color of an element.
///
/// Resolution order is the inline style, then the `bgcolor`/`color` attribute. Deprecated system
/// colors become "no color" for backgrounds and black for text. A `var(--x, fallback)` value
/// yields the fallback. In dark mode, a plain color is mapped back to the light color it was
/// registered for; when no registered pair matches, the color is dropped.
pub fn get_color(
    element: &Handle,
    is_background: bool,
    is_dark_mode: bool,
    dark_color_handler: Option<&dyn DarkColorHandler>,
) -> Option<String> {
    let color = if is_background {
        get_style(element, "background-color").or_else(|| get_attribute(element, "bgcolor"))
    } else {
        get_style(element, "color").or_else(|| get_attribute(element, "color"))
    }?;
    let color = color.trim().to_string();
    if color.is_empty() {
        return None;
    }

    if DEPRECATED_COLORS.contains(&color.to_ascii_lowercase().as_str()) {
        return if is_background {
            None
        } else {
            Some(BLACK_COLOR.to_string())
        };
    }

    if let Some(m) = VARIABLE.captures(&color) {
        return m
            .get(2)
            .map(|fallback| fallback.as_str().trim().to_string())
            .filter(|fallback| !fallback.is_empty());
    }

    match dark_color_handler {
        Some(handler) if is_dark_mode => {
            let light = find_light_color(&color, handler);
            if light.is_none() {
                tracing::debug!(color = %color, "dropping dark mode color without a known light color");
            }
            light
        }
        _ => Some(color),
    }
}

/// Write a color to an element. `None` or an empty color removes it.
///
/// In dark mode with a handler, the light color is registered (once per color key) together with
/// its dark counterpart and the element receives `var(--key, lightColor)`.
pub fn set_color(
    element: &Handle,
    light_color: Option<&str>,
    is_background: bool,
    is_dark_mode: bool,
    dark_color_handler: Option<&mut dyn DarkColorHandler>,
) {
    let property = if is_background {
        "background-color"
    } else {
        "color"
    };
    let light_color = light_color.map(str::trim).unwrap_or_default();
    let mut value = light_color.to_string();

    if is_dark_mode && !light_color.is_empty() {
        if let Some(handler) = dark_color_handler {
            let key = handler.generate_color_key(light_color);
            let dark_color = handler
                .known_colors()
                .get(&key)
                .map(|pair| pair.dark_mode_color.clone())
                .unwrap_or_else(|| handler.get_dark_color(light_color, is_background));
            handler.update_known_color(
                is_dark_mode,
                &key,
                ColorPair {
                    light_mode_color: light_color.to_string(),
                    dark_mode_color: dark_color,
                },
            );
            value = format!("var({key}, {light_color})");
        }
    }

    set_style(element, property, &value);
}

fn find_light_color(dark_color: &str, handler: &dyn DarkColorHandler) -> Option<String> {
    let wanted = parse_color(dark_color)?;
    handler
        .known_colors()
        .values()
        .find(|pair| parse_color(&pair.dark_mode_color) == Some(wanted))
        .map(|pair| pair.light_mode_color.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{create_element, get_style, set_attribute};
    use crate::utils::dark_color::DarkColorRegistry;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#aaa"), Some([170, 170, 170]));
        assert_eq!(parse_color(" #0a0B0c "), Some([10, 11, 12]));
        assert_eq!(parse_color("#abababc"), None);
        assert_eq!(parse_color("#abcd"), None);
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some([1, 2, 3]));
        assert_eq!(parse_color("rgba(1.1,2.2,3.3,4.4)"), Some([1, 2, 3]));
        assert_eq!(parse_color("red"), None);
    }

    #[test]
    fn test_get_color_resolution_order() {
        let div = create_element("div");
        set_attribute(&div, "bgcolor", "green");
        assert_eq!(get_color(&div, true, false, None).as_deref(), Some("green"));
        set_style(&div, "background-color", "red");
        assert_eq!(get_color(&div, true, false, None).as_deref(), Some("red"));
        assert_eq!(get_color(&div, false, false, None), None);
    }

    #[test]
    fn test_deprecated_colors() {
        let div = create_element("div");
        set_style(&div, "background-color", "activeborder");
        set_style(&div, "color", "menutext");
        assert_eq!(get_color(&div, true, false, None), None);
        assert_eq!(get_color(&div, false, false, None).as_deref(), Some(BLACK_COLOR));
    }

    #[test]
    fn test_variable_fallback() {
        let div = create_element("div");
        set_style(&div, "color", "var(--darkColor_red, red)");
        assert_eq!(get_color(&div, false, true, None).as_deref(), Some("red"));
    }

    #[test]
    fn test_dark_mode_lookup() {
        let mut registry = DarkColorRegistry::default();
        registry.update_known_color(
            true,
            "--darkColor_red",
            ColorPair {
                light_mode_color: "red".to_string(),
                dark_mode_color: "#010203".to_string(),
            },
        );

        let div = create_element("div");
        set_style(&div, "color", "rgb(1, 2, 3)");
        assert_eq!(
            get_color(&div, false, true, Some(&registry)).as_deref(),
            Some("red")
        );

        set_style(&div, "color", "rgb(9, 9, 9)");
        assert_eq!(get_color(&div, false, true, Some(&registry)), None);
    }

    #[test]
    fn test_set_color_light_mode() {
        let div = create_element("div");
        set_color(&div, Some("red"), false, false, None);
        assert_eq!(get_style(&div, "color").as_deref(), Some("red"));
        set_color(&div, None, false, false, None);
        assert_eq!(get_style(&div, "color"), None);
    }

    #[test]
    fn test_set_color_registers_once() {
        let mut registry = DarkColorRegistry::default();
        let first = create_element("span");
        let second = create_element("span");

        set_color(&first, Some("#ff0000"), false, true, Some(&mut registry));
        set_color(&second, Some("#ff0000"), false, true, Some(&mut registry));

        assert_eq!(registry.known_colors().len(), 1);
        assert_eq!(
            get_style(&first, "color").as_deref(),
            Some("var(--darkColor__ff0000, #ff0000)")
        );
        assert_eq!(get_style(&first, "color"), get_style(&second, "color"));
        assert_eq!(registry.registration_count(), 1);
    }
}
