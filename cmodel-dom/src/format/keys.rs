//! Ordered format keys per structural category.
//!
//! Order matters: parsers and appliers of a category run in exactly this order.

use super::FormatKey::{self, *};
use once_cell::sync::Lazy;

/// Keys every block-like category starts with.
pub const SHARED_BLOCK_FORMATS: [FormatKey; 5] =
    [Direction, TextAlign, HtmlAlign, LineHeight, WhiteSpace];

/// Box keys shared by containers.
pub const SHARED_CONTAINER_FORMATS: [FormatKey; 4] = [BackgroundColor, Margin, Padding, Border];

fn concat(parts: &[&[FormatKey]]) -> Vec<FormatKey> {
    parts.concat()
}

pub static BLOCK: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    concat(&[
        &[BackgroundColor],
        &SHARED_BLOCK_FORMATS,
        &[TextIndent, Margin, Padding, Border],
    ])
});

pub static CONTAINER: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    concat(&[
        &SHARED_BLOCK_FORMATS,
        &SHARED_CONTAINER_FORMATS,
        &[Size, Display],
    ])
});

pub static DIVIDER: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    concat(&[
        &SHARED_BLOCK_FORMATS,
        &SHARED_CONTAINER_FORMATS,
        &[Display, Size],
    ])
});

pub static LIST_ITEM_ELEMENT: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    concat(&[
        &SHARED_BLOCK_FORMATS,
        &[Margin, Padding, ListStyle, BackgroundColor],
    ])
});

pub static LIST_LEVEL: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        ListLevelThread,
        Direction,
        TextAlign,
        Margin,
        Padding,
        ListStyle,
        BackgroundColor,
    ]
});

/// Segment keys. Wrapping handlers come first so later wrappers end up outside earlier ones.
pub static SEGMENT: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        SuperOrSubScript,
        Strike,
        FontFamily,
        FontSize,
        Underline,
        Italic,
        Bold,
        TextColor,
        BackgroundColor,
        LetterSpacing,
        LineHeight,
    ]
});

pub static SEGMENT_ON_BLOCK: Lazy<Vec<FormatKey>> =
    Lazy::new(|| vec![FontFamily, FontSize, Underline, Italic, Bold, TextColor]);

pub static SEGMENT_ON_TABLE_CELL: Lazy<Vec<FormatKey>> =
    Lazy::new(|| vec![FontFamily, FontSize, Underline, Italic, Bold]);

pub static TABLE: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        Id,
        Border,
        BorderBox,
        TableSpacing,
        TableLayout,
        Margin,
        BackgroundColor,
        Direction,
        HtmlAlign,
        Display,
        Size,
    ]
});

pub static TABLE_ROW: Lazy<Vec<FormatKey>> = Lazy::new(|| vec![BackgroundColor]);

pub static TABLE_CELL: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        Border,
        BorderBox,
        BackgroundColor,
        Padding,
        Direction,
        TextAlign,
        HtmlAlign,
        VerticalAlign,
        WordBreak,
        TextColor,
        Size,
    ]
});

pub static TABLE_COLUMN: Lazy<Vec<FormatKey>> = Lazy::new(|| vec![Size]);

pub static IMAGE: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        Id, Size, Margin, Padding, BorderBox, Border, BoxShadow, Display, Float,
    ]
});

pub static LINK: Lazy<Vec<FormatKey>> = Lazy::new(|| {
    vec![
        Link,
        TextColor,
        Underline,
        BackgroundColor,
        Display,
        Margin,
        Padding,
        Border,
    ]
});

pub static DATASET: Lazy<Vec<FormatKey>> = Lazy::new(|| vec![Dataset]);

pub static ENTITY: Lazy<Vec<FormatKey>> = Lazy::new(|| vec![Entity]);

pub static CODE: Lazy<Vec<FormatKey>> = Lazy::new(|| vec![FontFamily, Display]);

/// Every category name with its key list.
pub fn categories() -> Vec<(&'static str, &'static [FormatKey])> {
    vec![
        ("block", BLOCK.as_slice()),
        ("container", CONTAINER.as_slice()),
        ("divider", DIVIDER.as_slice()),
        ("listItemElement", LIST_ITEM_ELEMENT.as_slice()),
        ("listLevel", LIST_LEVEL.as_slice()),
        ("segment", SEGMENT.as_slice()),
        ("segmentOnBlock", SEGMENT_ON_BLOCK.as_slice()),
        ("segmentOnTableCell", SEGMENT_ON_TABLE_CELL.as_slice()),
        ("table", TABLE.as_slice()),
        ("tableRow", TABLE_ROW.as_slice()),
        ("tableCell", TABLE_CELL.as_slice()),
        ("tableColumn", TABLE_COLUMN.as_slice()),
        ("image", IMAGE.as_slice()),
        ("link", LINK.as_slice()),
        ("dataset", DATASET.as_slice()),
        ("entity", ENTITY.as_slice()),
        ("code", CODE.as_slice()),
    ]
}
