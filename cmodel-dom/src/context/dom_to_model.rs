use super::editor::{EditorContext, SharedDarkColorHandler};
use crate::dom_to_model::{ElementProcessor, ElementProcessorMap};
use crate::format::{
    AdditionalFormatParsers, BlockFormat, Direction, FormatParserOverride, FormatParsers,
    SegmentFormat,
};
use crate::model::{Code, Link, ListLevel};
use crate::registry::FormatHandlerMap;
use crate::utils::color::get_color;
use markup5ever_rcdom::Handle;
use std::collections::BTreeMap;
use std::rc::Rc;

/// List nesting seen so far while parsing.
#[derive(Debug, Clone, Default)]
pub struct DomToModelListFormat {
    /// Open list levels, outermost first.
    pub levels: Vec<ListLevel>,
    /// Number of the last ordered item seen, per depth.
    pub thread_item_counts: Vec<u32>,
}

/// Resolved handlers of one parse pass.
pub struct DomToModelSettings {
    pub format_handlers: FormatHandlerMap,
    pub format_parsers: FormatParsers,
    pub element_processors: ElementProcessorMap,
}

/// Caller customization of a parse pass. Every field is optional.
#[derive(Default)]
pub struct DomToModelOption {
    /// Element processors by tag name, or one of `element`, `child`, `entity`, `#text`, `*`.
    pub processor_override: BTreeMap<String, ElementProcessor>,
    pub format_parser_override: FormatParserOverride,
    pub additional_format_parsers: AdditionalFormatParsers,
    pub base_format_handlers: Option<FormatHandlerMap>,
}

/// State of one DOM to model pass.
pub struct DomToModelContext {
    pub is_dark_mode: bool,
    pub dark_color_handler: Option<SharedDarkColorHandler>,
    pub default_format: SegmentFormat,
    /// Character format inherited by the node being processed.
    pub segment_format: SegmentFormat,
    /// Block format inherited by the node being processed.
    pub block_format: BlockFormat,
    pub link: Option<Link>,
    pub code: Option<Code>,
    pub list_format: DomToModelListFormat,
    /// Direction handlers resolved so far for the element being parsed.
    pub current_direction: Option<Direction>,
    pub settings: Rc<DomToModelSettings>,
}

impl DomToModelContext {
    /// Read a text or background color, translating dark mode colors back to light ones.
    pub fn color(&self, element: &Handle, is_background: bool) -> Option<String> {
        match &self.dark_color_handler {
            Some(handler) => {
                let handler = handler.borrow();
                get_color(element, is_background, self.is_dark_mode, Some(&*handler))
            }
            None => get_color(element, is_background, self.is_dark_mode, None),
        }
    }

    /// Run `f` and restore the inherited formats afterwards.
    pub fn stack_format<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let segment_format = self.segment_format.clone();
        let block_format = self.block_format.clone();
        let link = self.link.clone();
        let code = self.code.clone();

        let result = f(self);

        self.segment_format = segment_format;
        self.block_format = block_format;
        self.link = link;
        self.code = code;
        result
    }
}

pub fn create_dom_to_model_context(
    editor_context: Option<EditorContext>,
    option: DomToModelOption,
) -> DomToModelContext {
    let editor_context = editor_context.unwrap_or_default();
    let settings = DomToModelSettings {
        format_handlers: option.base_format_handlers.unwrap_or_default(),
        format_parsers: FormatParsers::build(
            &option.format_parser_override,
            &option.additional_format_parsers,
        ),
        element_processors: ElementProcessorMap::with_override(option.processor_override),
    };

    DomToModelContext {
        is_dark_mode: editor_context.is_dark_mode,
        dark_color_handler: editor_context.dark_color_handler,
        segment_format: editor_context.default_format.clone(),
        default_format: editor_context.default_format,
        block_format: BlockFormat::default(),
        link: None,
        code: None,
        list_format: DomToModelListFormat::default(),
        current_direction: None,
        settings: Rc::new(settings),
    }
}
