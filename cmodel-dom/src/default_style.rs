//! User agent default styles
//!
//! What a browser renders for a tag when nobody authored a style: `b` is bold, `p` has 1em
//! vertical margins, `li` is a list item and so on. Parsers fall back to these values when the
//! element carries no inline style, and the serializer uses them as the implicit format it does
//! not need to repeat.

/// Partial style declaration for one tag. Every field is a CSS property value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultStyle {
    pub display: Option<&'static str>,
    pub font_family: Option<&'static str>,
    pub font_size: Option<&'static str>,
    pub font_style: Option<&'static str>,
    pub font_weight: Option<&'static str>,
    pub text_decoration: Option<&'static str>,
    pub vertical_align: Option<&'static str>,
    pub white_space: Option<&'static str>,
    pub text_align: Option<&'static str>,
    pub margin_top: Option<&'static str>,
    pub margin_right: Option<&'static str>,
    pub margin_bottom: Option<&'static str>,
    pub margin_left: Option<&'static str>,
    pub padding_inline_start: Option<&'static str>,
    pub box_sizing: Option<&'static str>,
    pub border_collapse: Option<&'static str>,
}

impl DefaultStyle {
    pub const EMPTY: DefaultStyle = DefaultStyle {
        display: None,
        font_family: None,
        font_size: None,
        font_style: None,
        font_weight: None,
        text_decoration: None,
        vertical_align: None,
        white_space: None,
        text_align: None,
        margin_top: None,
        margin_right: None,
        margin_bottom: None,
        margin_left: None,
        padding_inline_start: None,
        box_sizing: None,
        border_collapse: None,
    };

    /// Look a value up by CSS property name.
    pub fn get(&self, property: &str) -> Option<&'static str> {
        match property {
            "display" => self.display,
            "font-family" => self.font_family,
            "font-size" => self.font_size,
            "font-style" => self.font_style,
            "font-weight" => self.font_weight,
            "text-decoration" => self.text_decoration,
            "vertical-align" => self.vertical_align,
            "white-space" => self.white_space,
            "text-align" => self.text_align,
            "margin-top" => self.margin_top,
            "margin-right" => self.margin_right,
            "margin-bottom" => self.margin_bottom,
            "margin-left" => self.margin_left,
            "padding-inline-start" => self.padding_inline_start,
            "box-sizing" => self.box_sizing,
            "border-collapse" => self.border_collapse,
            _ => None,
        }
    }

    /// Whether the tag renders as a block box by default.
    pub fn is_block(&self) -> bool {
        matches!(
            self.display,
            Some("block" | "list-item" | "table" | "flex" | "grid")
        )
    }
}

const BLOCK: DefaultStyle = DefaultStyle {
    display: Some("block"),
    ..DefaultStyle::EMPTY
};

const BOLD: DefaultStyle = DefaultStyle {
    font_weight: Some("bold"),
    ..DefaultStyle::EMPTY
};

const ITALIC: DefaultStyle = DefaultStyle {
    font_style: Some("italic"),
    ..DefaultStyle::EMPTY
};

const UNDERLINE: DefaultStyle = DefaultStyle {
    text_decoration: Some("underline"),
    ..DefaultStyle::EMPTY
};

const LINE_THROUGH: DefaultStyle = DefaultStyle {
    text_decoration: Some("line-through"),
    ..DefaultStyle::EMPTY
};

const MONOSPACE: DefaultStyle = DefaultStyle {
    font_family: Some("monospace"),
    ..DefaultStyle::EMPTY
};

const PARAGRAPH: DefaultStyle = DefaultStyle {
    display: Some("block"),
    margin_top: Some("1em"),
    margin_bottom: Some("1em"),
    ..DefaultStyle::EMPTY
};

const INDENTED_BLOCK: DefaultStyle = DefaultStyle {
    display: Some("block"),
    margin_top: Some("1em"),
    margin_bottom: Some("1em"),
    margin_left: Some("40px"),
    margin_right: Some("40px"),
    ..DefaultStyle::EMPTY
};

const LIST: DefaultStyle = DefaultStyle {
    display: Some("block"),
    margin_top: Some("1em"),
    margin_bottom: Some("1em"),
    padding_inline_start: Some("40px"),
    ..DefaultStyle::EMPTY
};

const fn heading(font_size: Option<&'static str>, margin: &'static str) -> DefaultStyle {
    DefaultStyle {
        display: Some("block"),
        font_weight: Some("bold"),
        font_size,
        margin_top: Some(margin),
        margin_bottom: Some(margin),
        ..DefaultStyle::EMPTY
    }
}

const H1: DefaultStyle = heading(Some("2em"), "0.67em");
const H2: DefaultStyle = heading(Some("1.5em"), "0.83em");
const H3: DefaultStyle = heading(Some("1.17em"), "1em");
const H4: DefaultStyle = heading(None, "1.33em");
const H5: DefaultStyle = heading(Some("0.83em"), "1.67em");
const H6: DefaultStyle = heading(Some("0.67em"), "2.33em");

const PRE: DefaultStyle = DefaultStyle {
    display: Some("block"),
    font_family: Some("monospace"),
    white_space: Some("pre"),
    margin_top: Some("1em"),
    margin_bottom: Some("1em"),
    ..DefaultStyle::EMPTY
};

const CENTER: DefaultStyle = DefaultStyle {
    display: Some("block"),
    text_align: Some("center"),
    ..DefaultStyle::EMPTY
};

const SUP: DefaultStyle = DefaultStyle {
    vertical_align: Some("super"),
    font_size: Some("smaller"),
    ..DefaultStyle::EMPTY
};

const SUB: DefaultStyle = DefaultStyle {
    vertical_align: Some("sub"),
    font_size: Some("smaller"),
    ..DefaultStyle::EMPTY
};

const LIST_ITEM: DefaultStyle = DefaultStyle {
    display: Some("list-item"),
    ..DefaultStyle::EMPTY
};

const TABLE: DefaultStyle = DefaultStyle {
    display: Some("table"),
    box_sizing: Some("border-box"),
    border_collapse: Some("separate"),
    ..DefaultStyle::EMPTY
};

const TABLE_ROW_GROUP: DefaultStyle = DefaultStyle {
    display: Some("table-row-group"),
    ..DefaultStyle::EMPTY
};

const TABLE_ROW: DefaultStyle = DefaultStyle {
    display: Some("table-row"),
    ..DefaultStyle::EMPTY
};

const TABLE_CELL: DefaultStyle = DefaultStyle {
    display: Some("table-cell"),
    ..DefaultStyle::EMPTY
};

const TABLE_HEADER_CELL: DefaultStyle = DefaultStyle {
    display: Some("table-cell"),
    font_weight: Some("bold"),
    text_align: Some("center"),
    ..DefaultStyle::EMPTY
};

const LINK: DefaultStyle = DefaultStyle {
    text_decoration: Some("underline"),
    ..DefaultStyle::EMPTY
};

const DIVIDER: DefaultStyle = DefaultStyle {
    display: Some("block"),
    margin_top: Some("0.5em"),
    margin_bottom: Some("0.5em"),
    ..DefaultStyle::EMPTY
};

/// Default style for a lower-case tag name. Unknown tags get [`DefaultStyle::EMPTY`].
pub fn default_style_of(tag: &str) -> &'static DefaultStyle {
    match tag {
        "a" => &LINK,
        "address" | "article" | "aside" | "dd" | "div" | "dl" | "dt" | "fieldset"
        | "figcaption" | "footer" | "form" | "header" | "main" | "nav" | "section" => &BLOCK,
        "b" | "strong" => &BOLD,
        "blockquote" | "figure" => &INDENTED_BLOCK,
        "center" => &CENTER,
        "code" | "kbd" | "samp" | "tt" => &MONOSPACE,
        "em" | "i" | "cite" | "dfn" | "var" => &ITALIC,
        "h1" => &H1,
        "h2" => &H2,
        "h3" => &H3,
        "h4" => &H4,
        "h5" => &H5,
        "h6" => &H6,
        "hr" => &DIVIDER,
        "ins" | "u" => &UNDERLINE,
        "li" => &LIST_ITEM,
        "ol" | "ul" => &LIST,
        "p" => &PARAGRAPH,
        "pre" => &PRE,
        "del" | "s" | "strike" => &LINE_THROUGH,
        "sub" => &SUB,
        "sup" => &SUP,
        "table" => &TABLE,
        "tbody" | "tfoot" | "thead" => &TABLE_ROW_GROUP,
        "td" => &TABLE_CELL,
        "th" => &TABLE_HEADER_CELL,
        "tr" => &TABLE_ROW,
        _ => &DefaultStyle::EMPTY,
    }
}
