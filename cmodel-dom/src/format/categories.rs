//! Closed format structs, one per structural category.
//!
//! Each struct flattens the slices its category parses, so the serialized form is a single flat
//! camelCase object. The macro also wires every slice to its key for dispatch.

use super::slices::*;
use super::{FormatKey, FormatSlots};
use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::DefaultStyle;
use crate::registry::FormatHandlerMap;
use markup5ever_rcdom::Handle;
use serde::{Deserialize, Serialize};

/// Implemented by every slice so categories can find the slice that records direction.
pub trait DirectionHint {
    fn direction_hint(&self) -> Option<Direction> {
        None
    }
}

impl DirectionHint for DirectionFormat {
    fn direction_hint(&self) -> Option<Direction> {
        self.direction
    }
}

macro_rules! no_direction {
    ($($slice:ty),* $(,)?) => {
        $(impl DirectionHint for $slice {})*
    };
}

no_direction!(
    BackgroundColorFormat,
    BoldFormat,
    BorderFormat,
    BorderBoxFormat,
    BoxShadowFormat,
    DisplayFormat,
    FloatFormat,
    FontFamilyFormat,
    FontSizeFormat,
    HtmlAlignFormat,
    IdFormat,
    ItalicFormat,
    LetterSpacingFormat,
    LineHeightFormat,
    LinkFormat,
    ListThreadFormat,
    ListStyleFormat,
    MarginFormat,
    PaddingFormat,
    SizeFormat,
    StrikeFormat,
    SuperOrSubScriptFormat,
    TableLayoutFormat,
    SpacingFormat,
    TextAlignFormat,
    TextColorFormat,
    TextIndentFormat,
    UnderlineFormat,
    VerticalAlignFormat,
    WhiteSpaceFormat,
    WordBreakFormat,
);

macro_rules! category_format {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident: $slice:ty => $key:ident),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(flatten)]
                pub $field: $slice,
            )*
        }

        impl $name {
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_empty())*
            }
        }

        impl FormatSlots for $name {
            fn has_key(key: FormatKey) -> bool {
                matches!(key, $(FormatKey::$key)|*)
            }

            fn parse_key(
                &mut self,
                key: FormatKey,
                handlers: &FormatHandlerMap,
                element: &Handle,
                context: &mut DomToModelContext,
                default_style: &DefaultStyle,
            ) {
                match key {
                    $(FormatKey::$key => {
                        (handlers.$field.parse)(&mut self.$field, element, context, default_style)
                    })*
                    _ => {}
                }
            }

            fn apply_key(
                &self,
                key: FormatKey,
                handlers: &FormatHandlerMap,
                element: &Handle,
                context: &mut ModelToDomContext,
            ) {
                match key {
                    $(FormatKey::$key => (handlers.$field.apply)(&self.$field, element, context),)*
                    _ => {}
                }
            }

            fn direction_hint(&self) -> Option<Direction> {
                None::<Direction> $(.or_else(|| self.$field.direction_hint()))*
            }
        }
    };
}

/// Slice types that are a category on their own.
macro_rules! single_slice_category {
    ($($slice:ty => $field:ident: $key:ident),* $(,)?) => {
        $(
            impl FormatSlots for $slice {
                fn has_key(key: FormatKey) -> bool {
                    key == FormatKey::$key
                }

                fn parse_key(
                    &mut self,
                    key: FormatKey,
                    handlers: &FormatHandlerMap,
                    element: &Handle,
                    context: &mut DomToModelContext,
                    default_style: &DefaultStyle,
                ) {
                    if key == FormatKey::$key {
                        (handlers.$field.parse)(self, element, context, default_style);
                    }
                }

                fn apply_key(
                    &self,
                    key: FormatKey,
                    handlers: &FormatHandlerMap,
                    element: &Handle,
                    context: &mut ModelToDomContext,
                ) {
                    if key == FormatKey::$key {
                        (handlers.$field.apply)(self, element, context);
                    }
                }

                fn direction_hint(&self) -> Option<Direction> {
                    None
                }
            }
        )*
    };
}

single_slice_category!(
    DatasetFormat => dataset: Dataset,
    EntityFormat => entity: Entity,
);

category_format!(
    /// Format of a paragraph (or any block written as one element).
    BlockFormat {
        background_color: BackgroundColorFormat => BackgroundColor,
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        html_align: HtmlAlignFormat => HtmlAlign,
        line_height: LineHeightFormat => LineHeight,
        white_space: WhiteSpaceFormat => WhiteSpace,
        text_indent: TextIndentFormat => TextIndent,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        border: BorderFormat => Border,
    }
);

category_format!(
    /// Format of a block group wrapper such as `blockquote` or `pre`.
    ContainerFormat {
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        html_align: HtmlAlignFormat => HtmlAlign,
        line_height: LineHeightFormat => LineHeight,
        white_space: WhiteSpaceFormat => WhiteSpace,
        background_color: BackgroundColorFormat => BackgroundColor,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        border: BorderFormat => Border,
        size: SizeFormat => Size,
        display: DisplayFormat => Display,
    }
);

category_format!(
    DividerFormat {
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        html_align: HtmlAlignFormat => HtmlAlign,
        line_height: LineHeightFormat => LineHeight,
        white_space: WhiteSpaceFormat => WhiteSpace,
        background_color: BackgroundColorFormat => BackgroundColor,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        border: BorderFormat => Border,
        display: DisplayFormat => Display,
        size: SizeFormat => Size,
    }
);

category_format!(
    /// Format of the `li` element itself.
    ListItemFormat {
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        html_align: HtmlAlignFormat => HtmlAlign,
        line_height: LineHeightFormat => LineHeight,
        white_space: WhiteSpaceFormat => WhiteSpace,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        list_style: ListStyleFormat => ListStyle,
        background_color: BackgroundColorFormat => BackgroundColor,
    }
);

category_format!(
    /// Format of one `ol`/`ul` level.
    ListLevelFormat {
        list_level_thread: ListThreadFormat => ListLevelThread,
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        list_style: ListStyleFormat => ListStyle,
        background_color: BackgroundColorFormat => BackgroundColor,
    }
);

category_format!(
    /// Character format of text, images and entities.
    SegmentFormat {
        super_or_sub_script: SuperOrSubScriptFormat => SuperOrSubScript,
        strike: StrikeFormat => Strike,
        font_family: FontFamilyFormat => FontFamily,
        font_size: FontSizeFormat => FontSize,
        underline: UnderlineFormat => Underline,
        italic: ItalicFormat => Italic,
        bold: BoldFormat => Bold,
        text_color: TextColorFormat => TextColor,
        background_color: BackgroundColorFormat => BackgroundColor,
        letter_spacing: LetterSpacingFormat => LetterSpacing,
        line_height: LineHeightFormat => LineHeight,
    }
);

category_format!(
    TableFormat {
        id: IdFormat => Id,
        border: BorderFormat => Border,
        border_box: BorderBoxFormat => BorderBox,
        table_spacing: SpacingFormat => TableSpacing,
        table_layout: TableLayoutFormat => TableLayout,
        margin: MarginFormat => Margin,
        background_color: BackgroundColorFormat => BackgroundColor,
        direction: DirectionFormat => Direction,
        html_align: HtmlAlignFormat => HtmlAlign,
        display: DisplayFormat => Display,
        size: SizeFormat => Size,
    }
);

category_format!(
    TableRowFormat {
        background_color: BackgroundColorFormat => BackgroundColor,
    }
);

category_format!(
    TableCellFormat {
        border: BorderFormat => Border,
        border_box: BorderBoxFormat => BorderBox,
        background_color: BackgroundColorFormat => BackgroundColor,
        padding: PaddingFormat => Padding,
        direction: DirectionFormat => Direction,
        text_align: TextAlignFormat => TextAlign,
        html_align: HtmlAlignFormat => HtmlAlign,
        vertical_align: VerticalAlignFormat => VerticalAlign,
        word_break: WordBreakFormat => WordBreak,
        text_color: TextColorFormat => TextColor,
        size: SizeFormat => Size,
    }
);

category_format!(
    TableColumnFormat {
        size: SizeFormat => Size,
    }
);

category_format!(
    ImageFormat {
        id: IdFormat => Id,
        size: SizeFormat => Size,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        border_box: BorderBoxFormat => BorderBox,
        border: BorderFormat => Border,
        box_shadow: BoxShadowFormat => BoxShadow,
        display: DisplayFormat => Display,
        float: FloatFormat => Float,
    }
);

category_format!(
    /// Format of an `a` element.
    HyperLinkFormat {
        link: LinkFormat => Link,
        text_color: TextColorFormat => TextColor,
        underline: UnderlineFormat => Underline,
        background_color: BackgroundColorFormat => BackgroundColor,
        display: DisplayFormat => Display,
        margin: MarginFormat => Margin,
        padding: PaddingFormat => Padding,
        border: BorderFormat => Border,
    }
);

category_format!(
    CodeFormat {
        font_family: FontFamilyFormat => FontFamily,
        display: DisplayFormat => Display,
    }
);

impl BlockFormat {
    /// Block format a nested block starts from: the inheritable parts of this one.
    pub fn inheritable(&self) -> BlockFormat {
        BlockFormat {
            direction: self.direction.clone(),
            text_align: self.text_align.clone(),
            html_align: self.html_align.clone(),
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            margin: MarginFormat {
                margin_left: self.margin.margin_left.clone(),
                margin_right: self.margin.margin_right.clone(),
                ..MarginFormat::default()
            },
            ..BlockFormat::default()
        }
    }
}

impl ContainerFormat {
    /// Block format the children of this container start from.
    pub fn inheritable_block_format(&self) -> BlockFormat {
        BlockFormat {
            direction: self.direction.clone(),
            text_align: self.text_align.clone(),
            html_align: self.html_align.clone(),
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            ..BlockFormat::default()
        }
    }
}

impl ListItemFormat {
    pub fn inheritable_block_format(&self) -> BlockFormat {
        BlockFormat {
            direction: self.direction.clone(),
            text_align: self.text_align.clone(),
            html_align: self.html_align.clone(),
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            ..BlockFormat::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::keys;

    fn assert_slots<F: FormatSlots>(keys: &[FormatKey]) {
        for key in keys {
            assert!(F::has_key(*key), "missing slot for {key}");
        }
    }

    #[test]
    fn test_every_listed_key_has_a_slot() {
        assert_slots::<BlockFormat>(&keys::BLOCK);
        assert_slots::<ContainerFormat>(&keys::CONTAINER);
        assert_slots::<DividerFormat>(&keys::DIVIDER);
        assert_slots::<ListItemFormat>(&keys::LIST_ITEM_ELEMENT);
        assert_slots::<ListLevelFormat>(&keys::LIST_LEVEL);
        assert_slots::<SegmentFormat>(&keys::SEGMENT);
        assert_slots::<SegmentFormat>(&keys::SEGMENT_ON_BLOCK);
        assert_slots::<SegmentFormat>(&keys::SEGMENT_ON_TABLE_CELL);
        assert_slots::<TableFormat>(&keys::TABLE);
        assert_slots::<TableRowFormat>(&keys::TABLE_ROW);
        assert_slots::<TableCellFormat>(&keys::TABLE_CELL);
        assert_slots::<TableColumnFormat>(&keys::TABLE_COLUMN);
        assert_slots::<ImageFormat>(&keys::IMAGE);
        assert_slots::<HyperLinkFormat>(&keys::LINK);
        assert_slots::<DatasetFormat>(&keys::DATASET);
        assert_slots::<EntityFormat>(&keys::ENTITY);
        assert_slots::<CodeFormat>(&keys::CODE);
    }

    #[test]
    fn test_foreign_key_is_not_a_slot() {
        assert!(!SegmentFormat::has_key(FormatKey::Margin));
        assert!(!TableRowFormat::has_key(FormatKey::Size));
    }

    #[test]
    fn test_flattened_serialization() {
        let mut format = BlockFormat::default();
        format.margin.margin_top = Some("1px".to_string());
        format.direction.direction = Some(Direction::Rtl);
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, r#"{"direction":"rtl","marginTop":"1px"}"#);

        let back: BlockFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
        assert_eq!(back.direction_hint(), Some(Direction::Rtl));
    }

    #[test]
    fn test_inheritable_keeps_side_margins_only() {
        let mut format = BlockFormat::default();
        format.margin.margin_top = Some("1em".to_string());
        format.margin.margin_left = Some("40px".to_string());
        format.background_color.background_color = Some("red".to_string());

        let inherited = format.inheritable();
        assert_eq!(inherited.margin.margin_top, None);
        assert_eq!(inherited.margin.margin_left.as_deref(), Some("40px"));
        assert!(inherited.background_color.is_empty());
    }
}
