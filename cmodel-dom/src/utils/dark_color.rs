//! Registry of light/dark color pairs.
//!
//! The registry outlives individual conversions: it belongs to the host editor and is handed to
//! each conversion context, so a document moved between light and dark mode keeps reusing the
//! same color variables.

use crate::utils::color::parse_color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of generated color variable names.
pub const COLOR_VAR_PREFIX: &str = "--darkColor";

/// A light mode color and the color used in its place in dark mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    pub light_mode_color: String,
    pub dark_mode_color: String,
}

/// Capability used by color handlers to translate colors in dark mode.
pub trait DarkColorHandler {
    /// All registered pairs, keyed by color variable name.
    fn known_colors(&self) -> &BTreeMap<String, ColorPair>;

    /// Record a pair. Only takes effect in dark mode.
    fn update_known_color(&mut self, is_dark_mode: bool, key: &str, pair: ColorPair);

    /// Derive a dark mode color for a light color.
    fn get_dark_color(&self, light_color: &str, is_background: bool) -> String;

    /// Variable name used for a light color.
    fn generate_color_key(&self, light_color: &str) -> String {
        default_generate_color_key(light_color)
    }
}

/// `--darkColor_` followed by the light color with every non-word character replaced by `_`.
pub fn default_generate_color_key(light_color: &str) -> String {
    let sanitized: String = light_color
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("{COLOR_VAR_PREFIX}_{sanitized}")
}

/// Function deriving a dark color from a light one.
pub type ColorTransform = fn(&str, bool) -> String;

/// Default [`DarkColorHandler`]: keeps pairs in memory and derives dark colors with a
/// configurable transform (HSL lightness inversion by default).
#[derive(Debug, Clone)]
pub struct DarkColorRegistry {
    known_colors: BTreeMap<String, ColorPair>,
    transform: ColorTransform,
    registrations: usize,
}

impl DarkColorRegistry {
    pub fn new(transform: ColorTransform) -> Self {
        Self {
            known_colors: BTreeMap::new(),
            transform,
            registrations: 0,
        }
    }

    /// Number of distinct pairs ever registered.
    pub fn registration_count(&self) -> usize {
        self.registrations
    }

    /// Drop every registered pair.
    pub fn reset(&mut self) {
        self.known_colors.clear();
    }
}

impl Default for DarkColorRegistry {
    fn default() -> Self {
        Self::new(invert_lightness)
    }
}

impl DarkColorHandler for DarkColorRegistry {
    fn known_colors(&self) -> &BTreeMap<String, ColorPair> {
        &self.known_colors
    }

    fn update_known_color(&mut self, is_dark_mode: bool, key: &str, pair: ColorPair) {
        if !is_dark_mode || key.is_empty() {
            return;
        }
        if self.known_colors.get(key) == Some(&pair) {
            return;
        }
        tracing::debug!(
            key,
            light = %pair.light_mode_color,
            dark = %pair.dark_mode_color,
            "registering dark mode color"
        );
        self.known_colors.insert(key.to_string(), pair);
        self.registrations += 1;
    }

    fn get_dark_color(&self, light_color: &str, is_background: bool) -> String {
        (self.transform)(light_color, is_background)
    }
}

/// Keep hue and saturation, mirror lightness. Colors that cannot be parsed are returned as is.
pub fn invert_lightness(color: &str, _is_background: bool) -> String {
    let Some([r, g, b]) = parse_color(color) else {
        return color.to_string();
    };
    let (h, s, l) = rgb_to_hsl(r.min(255), g.min(255), b.min(255));
    let [r, g, b] = hsl_to_rgb(h, s, 1.0 - l);
    format!("rgb({r}, {g}, {b})")
}

fn rgb_to_hsl(r: u32, g: u32, b: u32) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u32; 3] {
    let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u32;
    if s == 0.0 {
        let v = to_byte(l);
        return [v, v, v];
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let hue = |mut t: f64| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [
        to_byte(hue(h + 1.0 / 3.0)),
        to_byte(hue(h)),
        to_byte(hue(h - 1.0 / 3.0)),
    ]
}
