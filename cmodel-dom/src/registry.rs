//! Format handler registry
//!
//! One typed [`FormatHandler`] per [`FormatKey`]. The map is built once from the built-in
//! handlers and shared by every conversion context. Callers replace a handler with struct update
//! syntax:
//!
//! ```ignore
//! let handlers = FormatHandlerMap {
//!     margin: MY_MARGIN_HANDLER,
//!     ..FormatHandlerMap::with_defaults()
//! };
//! ```

use crate::format::handlers::*;
use crate::format::slices::*;
use crate::format::{FormatHandler, FormatKey};

macro_rules! handler_map {
    ($($field:ident: $slice:ty = $handler:ident => $key:ident),* $(,)?) => {
        /// Handler of every format key.
        #[derive(Clone, Copy)]
        pub struct FormatHandlerMap {
            $(pub $field: FormatHandler<$slice>,)*
        }

        impl FormatHandlerMap {
            /// The built-in handlers
            pub fn with_defaults() -> Self {
                FormatHandlerMap {
                    $($field: $handler,)*
                }
            }

            /// Whether `name` is the name of a format key (`margin`, not `marginTop`).
            pub fn has(name: &str) -> bool {
                FormatKey::from_name(name).is_some()
            }

            /// All key names with a handler (sorted)
            pub fn list_keys() -> Vec<&'static str> {
                let mut names = vec![$(FormatKey::$key.as_str(),)*];
                names.sort_unstable();
                names
            }
        }
    };
}

handler_map! {
    background_color: BackgroundColorFormat = BACKGROUND_COLOR_HANDLER => BackgroundColor,
    bold: BoldFormat = BOLD_HANDLER => Bold,
    border: BorderFormat = BORDER_HANDLER => Border,
    border_box: BorderBoxFormat = BORDER_BOX_HANDLER => BorderBox,
    box_shadow: BoxShadowFormat = BOX_SHADOW_HANDLER => BoxShadow,
    dataset: DatasetFormat = DATASET_HANDLER => Dataset,
    direction: DirectionFormat = DIRECTION_HANDLER => Direction,
    display: DisplayFormat = DISPLAY_HANDLER => Display,
    entity: EntityFormat = ENTITY_HANDLER => Entity,
    float: FloatFormat = FLOAT_HANDLER => Float,
    font_family: FontFamilyFormat = FONT_FAMILY_HANDLER => FontFamily,
    font_size: FontSizeFormat = FONT_SIZE_HANDLER => FontSize,
    html_align: HtmlAlignFormat = HTML_ALIGN_HANDLER => HtmlAlign,
    id: IdFormat = ID_HANDLER => Id,
    italic: ItalicFormat = ITALIC_HANDLER => Italic,
    letter_spacing: LetterSpacingFormat = LETTER_SPACING_HANDLER => LetterSpacing,
    line_height: LineHeightFormat = LINE_HEIGHT_HANDLER => LineHeight,
    link: LinkFormat = LINK_HANDLER => Link,
    list_level_thread: ListThreadFormat = LIST_LEVEL_THREAD_HANDLER => ListLevelThread,
    list_style: ListStyleFormat = LIST_STYLE_HANDLER => ListStyle,
    margin: MarginFormat = MARGIN_HANDLER => Margin,
    padding: PaddingFormat = PADDING_HANDLER => Padding,
    size: SizeFormat = SIZE_HANDLER => Size,
    strike: StrikeFormat = STRIKE_HANDLER => Strike,
    super_or_sub_script: SuperOrSubScriptFormat = SUPER_OR_SUB_SCRIPT_HANDLER => SuperOrSubScript,
    table_layout: TableLayoutFormat = TABLE_LAYOUT_HANDLER => TableLayout,
    table_spacing: SpacingFormat = TABLE_SPACING_HANDLER => TableSpacing,
    text_align: TextAlignFormat = TEXT_ALIGN_HANDLER => TextAlign,
    text_color: TextColorFormat = TEXT_COLOR_HANDLER => TextColor,
    text_indent: TextIndentFormat = TEXT_INDENT_HANDLER => TextIndent,
    underline: UnderlineFormat = UNDERLINE_HANDLER => Underline,
    vertical_align: VerticalAlignFormat = VERTICAL_ALIGN_HANDLER => VerticalAlign,
    white_space: WhiteSpaceFormat = WHITE_SPACE_HANDLER => WhiteSpace,
    word_break: WordBreakFormat = WORD_BREAK_HANDLER => WordBreak,
}

impl Default for FormatHandlerMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}
