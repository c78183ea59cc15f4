//! Format handlers and the per category dispatch built on them
//!
//!     A format is split into slices, one per [`FormatKey`]. Each slice has exactly one
//!     [`FormatHandler`]: a `parse` function reading the slice off a DOM element and an `apply`
//!     function writing it back. The handlers live in [`handlers`] and are collected into the
//!     [`FormatHandlerMap`](crate::registry::FormatHandlerMap).
//!
//!     Structural categories (block, segment, table cell, ...) own a fixed, ordered list of keys
//!     (see [`keys`]) and a closed format struct holding the matching slices (see [`categories`]).
//!     Parsing or applying a category runs its keys in order, so a slice can rely on the slices
//!     before it (direction is always resolved before alignment).
//!
//!     Callers can replace or disable the handler of one key for one category, or append extra
//!     parsers/appliers to a category, without touching the handler map (see [`overrides`]).

pub mod categories;
pub mod handlers;
pub mod keys;
pub mod overrides;
pub mod slices;

use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::{default_style_of, DefaultStyle};
use crate::dom::tag_name;
use crate::registry::FormatHandlerMap;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub use categories::*;
pub use overrides::{
    AdditionalFormatAppliers, AdditionalFormatParsers, CategoryApplier, CategoryParser,
    FormatApplierOverride, FormatAppliers, FormatParserOverride, FormatParsers,
};
pub use slices::*;

/// Reads one format slice off an element. Only ever adds to the slice.
pub type FormatParser<F> = fn(&mut F, &Handle, &mut DomToModelContext, &DefaultStyle);

/// Writes one format slice onto an element.
pub type FormatApplier<F> = fn(&F, &Handle, &mut ModelToDomContext);

/// Matched parse/apply pair for one format slice.
pub struct FormatHandler<F: 'static> {
    pub parse: FormatParser<F>,
    pub apply: FormatApplier<F>,
}

impl<F: 'static> Clone for FormatHandler<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: 'static> Copy for FormatHandler<F> {}

macro_rules! format_keys {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Name of one format slice.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum FormatKey {
            $($variant,)*
        }

        impl FormatKey {
            pub const ALL: &'static [FormatKey] = &[$(FormatKey::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(FormatKey::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<FormatKey> {
                match name {
                    $($name => Some(FormatKey::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

format_keys! {
    BackgroundColor => "backgroundColor",
    Bold => "bold",
    Border => "border",
    BorderBox => "borderBox",
    BoxShadow => "boxShadow",
    Dataset => "dataset",
    Direction => "direction",
    Display => "display",
    Entity => "entity",
    Float => "float",
    FontFamily => "fontFamily",
    FontSize => "fontSize",
    HtmlAlign => "htmlAlign",
    Id => "id",
    Italic => "italic",
    LetterSpacing => "letterSpacing",
    LineHeight => "lineHeight",
    Link => "link",
    ListLevelThread => "listLevelThread",
    ListStyle => "listStyle",
    Margin => "margin",
    Padding => "padding",
    Size => "size",
    Strike => "strike",
    SuperOrSubScript => "superOrSubScript",
    TableLayout => "tableLayout",
    TableSpacing => "tableSpacing",
    TextAlign => "textAlign",
    TextColor => "textColor",
    TextIndent => "textIndent",
    Underline => "underline",
    VerticalAlign => "verticalAlign",
    WhiteSpace => "whiteSpace",
    WordBreak => "wordBreak",
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category format: a closed set of slices addressable by [`FormatKey`].
///
/// Keys a category has no slice for are ignored by both `parse_key` and `apply_key`.
pub trait FormatSlots: Default + 'static {
    fn has_key(key: FormatKey) -> bool;

    fn parse_key(
        &mut self,
        key: FormatKey,
        handlers: &FormatHandlerMap,
        element: &Handle,
        context: &mut DomToModelContext,
        default_style: &DefaultStyle,
    );

    fn apply_key(
        &self,
        key: FormatKey,
        handlers: &FormatHandlerMap,
        element: &Handle,
        context: &mut ModelToDomContext,
    );

    /// Direction recorded in this format, if it has a direction slice holding one.
    fn direction_hint(&self) -> Option<Direction>;
}

/// Run a category's parsers over `element`, accumulating into `format`.
pub fn parse_format<F: FormatSlots>(
    element: &Handle,
    parsers: &[CategoryParser<F>],
    format: &mut F,
    context: &mut DomToModelContext,
) {
    let settings = Rc::clone(&context.settings);
    let default_style = tag_name(element)
        .map(|tag| default_style_of(&tag))
        .unwrap_or(&DefaultStyle::EMPTY);
    let saved_direction = context.current_direction;

    for parser in parsers {
        context.current_direction = format.direction_hint();
        match parser {
            CategoryParser::Key(key) => format.parse_key(
                *key,
                &settings.format_handlers,
                element,
                context,
                default_style,
            ),
            CategoryParser::Override(_, parse) | CategoryParser::Additional(_, parse) => {
                parse(format, element, context, default_style)
            }
        }
    }

    context.current_direction = saved_direction;
}

/// Run a category's appliers, writing `format` onto `element`.
pub fn apply_format<F: FormatSlots>(
    element: &Handle,
    appliers: &[CategoryApplier<F>],
    format: &F,
    context: &mut ModelToDomContext,
) {
    let settings = Rc::clone(&context.settings);
    let saved_direction = context.current_direction;
    context.current_direction = format.direction_hint();

    for applier in appliers {
        match applier {
            CategoryApplier::Key(key) => {
                format.apply_key(*key, &settings.format_handlers, element, context)
            }
            CategoryApplier::Override(_, apply) | CategoryApplier::Additional(_, apply) => {
                apply(format, element, context)
            }
        }
    }

    context.current_direction = saved_direction;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in FormatKey::ALL {
            assert_eq!(FormatKey::from_name(key.as_str()), Some(*key));
        }
        assert_eq!(FormatKey::ALL.len(), 34);
        assert_eq!(FormatKey::from_name("fontWeight"), None);
    }

    #[test]
    fn test_key_serializes_camel_case() {
        let json = serde_json::to_string(&FormatKey::SuperOrSubScript).unwrap();
        assert_eq!(json, "\"superOrSubScript\"");
    }
}
