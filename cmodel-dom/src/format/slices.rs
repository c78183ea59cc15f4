//! Format slices: the unit a single format handler reads and writes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Logical horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Start,
    Center,
    End,
    Justify,
    Initial,
}

/// Vertical alignment of table cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

macro_rules! format_slice {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$field_meta:meta])* $field:ident: $ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

format_slice!(BackgroundColorFormat {
    background_color: String,
});

format_slice!(
    /// Tri-state: `Some(true)` bold, `Some(false)` explicitly normal, `None` inherited.
    BoldFormat { bold: bool }
);

format_slice!(BorderFormat {
    border_top: String,
    border_right: String,
    border_bottom: String,
    border_left: String,
    border_radius: String,
    border_top_left_radius: String,
    border_top_right_radius: String,
    border_bottom_left_radius: String,
    border_bottom_right_radius: String,
});

format_slice!(BorderBoxFormat {
    use_border_box: bool,
});

format_slice!(BoxShadowFormat { box_shadow: String });

format_slice!(DirectionFormat {
    direction: Direction,
});

format_slice!(DisplayFormat { display: String });

format_slice!(FloatFormat { float: String });

format_slice!(FontFamilyFormat { font_family: String });

format_slice!(FontSizeFormat { font_size: String });

format_slice!(HtmlAlignFormat {
    html_align: Alignment,
});

format_slice!(IdFormat { id: String });

format_slice!(
    /// Tri-state, like [`BoldFormat`].
    ItalicFormat { italic: bool }
);

format_slice!(LetterSpacingFormat {
    letter_spacing: String,
});

format_slice!(LineHeightFormat { line_height: String });

format_slice!(LinkFormat {
    href: String,
    target: String,
    anchor_title: String,
    anchor_id: String,
    anchor_class: String,
    name: String,
    relationship: String,
});

format_slice!(
    /// Explicit start number of an ordered list that does not continue the running count.
    ListThreadFormat { start_number_override: u32 }
);

format_slice!(ListStyleFormat {
    list_style_position: String,
    list_style_type: String,
});

format_slice!(MarginFormat {
    margin_top: String,
    margin_right: String,
    margin_bottom: String,
    margin_left: String,
});

format_slice!(PaddingFormat {
    padding_top: String,
    padding_right: String,
    padding_bottom: String,
    padding_left: String,
});

format_slice!(SizeFormat {
    width: String,
    height: String,
    max_width: String,
    max_height: String,
    min_width: String,
    min_height: String,
});

format_slice!(StrikeFormat { strikethrough: bool });

format_slice!(
    /// Space separated `super`/`sub` tokens, outermost first.
    SuperOrSubScriptFormat { super_or_sub_script_sequence: String }
);

format_slice!(TableLayoutFormat { table_layout: String });

format_slice!(SpacingFormat {
    border_collapse: bool,
    border_separate: bool,
});

format_slice!(TextAlignFormat {
    text_align: Alignment,
});

format_slice!(TextColorFormat { text_color: String });

format_slice!(TextIndentFormat { text_indent: String });

format_slice!(
    /// Tri-state, like [`BoldFormat`].
    UnderlineFormat { underline: bool }
);

format_slice!(VerticalAlignFormat {
    vertical_align: VerticalAlign,
});

format_slice!(WhiteSpaceFormat { white_space: String });

format_slice!(WordBreakFormat { word_break: String });

format_slice!(
    /// Metadata of an embedded, usually non-editable widget.
    EntityFormat {
        id: String,
        entity_type: String,
        is_readonly: bool,
        is_fake_entity: bool,
    }
);

/// `data-*` attributes keyed the way `HTMLElement.dataset` keys them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetFormat(pub BTreeMap<String, String>);

impl DatasetFormat {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}
