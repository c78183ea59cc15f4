use super::editor::{EditorContext, SharedDarkColorHandler};
use crate::default_style::default_style_of;
use crate::format::{
    AdditionalFormatAppliers, DatasetFormat, Direction, FormatApplierOverride, FormatAppliers,
    ListLevelFormat, MarginFormat, SegmentFormat,
};
use crate::model::ListType;
use crate::model_to_dom::{ModelHandlerMap, ModelHandlerOverride};
use crate::registry::FormatHandlerMap;
use crate::utils::color::set_color;
use markup5ever_rcdom::Handle;
use std::fmt;
use std::rc::Rc;

/// Kind of content model node a DOM node was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelNodeKind {
    Paragraph,
    Text,
    Br,
    Image,
    Entity,
    ListLevel,
    ListItem,
    Table,
    TableRow,
    TableCell,
    Divider,
    FormatContainer,
}

/// Called for every DOM node the serializer creates.
pub type OnNodeCreated = Rc<dyn Fn(ModelNodeKind, &Handle)>;

/// Format values a node gets without writing them: inherited from ancestors or implied by its
/// own tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImplicitFormat {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub text_color: Option<String>,
    pub line_height: Option<String>,
    pub white_space: Option<String>,
    /// Margins are not inherited; this is the margin of the current tag only.
    pub margin: MarginFormat,
}

impl ImplicitFormat {
    /// What the browser renders `tag` with by default.
    pub fn for_tag(tag: &str) -> Self {
        let style = default_style_of(tag);
        let own = |value: Option<&'static str>| value.map(str::to_string);
        ImplicitFormat {
            bold: style
                .font_weight
                .map(|weight| weight == "bold" || weight == "bolder"),
            italic: style.font_style.map(|value| value == "italic"),
            underline: style
                .text_decoration
                .filter(|value| value.contains("underline"))
                .map(|_| true),
            font_family: own(style.font_family),
            font_size: own(style.font_size),
            text_color: None,
            line_height: None,
            white_space: own(style.white_space),
            margin: MarginFormat {
                margin_top: own(style.margin_top),
                margin_right: own(style.margin_right),
                margin_bottom: own(style.margin_bottom),
                margin_left: own(style.margin_left),
            },
        }
    }

    /// Implicit format inside a `tag` child of a node with this implicit format.
    pub fn enter(&self, tag: &str) -> Self {
        let own = Self::for_tag(tag);
        ImplicitFormat {
            bold: own.bold.or(self.bold),
            italic: own.italic.or(self.italic),
            underline: own.underline.or(self.underline),
            font_family: own.font_family.or_else(|| self.font_family.clone()),
            font_size: own.font_size.or_else(|| self.font_size.clone()),
            text_color: self.text_color.clone(),
            line_height: self.line_height.clone(),
            white_space: own.white_space.or_else(|| self.white_space.clone()),
            margin: own.margin,
        }
    }

    /// Overlay the character format an ancestor element already wrote.
    pub fn with_segment_format(&self, format: &SegmentFormat) -> Self {
        ImplicitFormat {
            bold: format.bold.bold.or(self.bold),
            italic: format.italic.italic.or(self.italic),
            underline: format.underline.underline.or(self.underline),
            font_family: format
                .font_family
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_size: format
                .font_size
                .font_size
                .clone()
                .or_else(|| self.font_size.clone()),
            text_color: format
                .text_color
                .text_color
                .clone()
                .or_else(|| self.text_color.clone()),
            line_height: format
                .line_height
                .line_height
                .clone()
                .or_else(|| self.line_height.clone()),
            white_space: self.white_space.clone(),
            margin: self.margin.clone(),
        }
    }
}

/// One open list container while serializing lists. The first entry is the list parent.
#[derive(Debug, Clone)]
pub struct ListNode {
    pub node: Handle,
    pub list_type: Option<ListType>,
    pub format: ListLevelFormat,
    pub dataset: DatasetFormat,
}

#[derive(Debug, Clone, Default)]
pub struct ModelToDomListFormat {
    /// Number of the last ordered item written, per depth.
    pub thread_item_counts: Vec<u32>,
    pub node_stack: Vec<ListNode>,
}

/// Resolved handlers of one serialize pass.
pub struct ModelToDomSettings {
    pub format_handlers: FormatHandlerMap,
    pub format_appliers: FormatAppliers,
    pub model_handlers: ModelHandlerMap,
}

/// Caller customization of a serialize pass. Every field is optional.
#[derive(Default)]
pub struct ModelToDomOption {
    pub on_node_created: Option<OnNodeCreated>,
    pub model_handler_override: ModelHandlerOverride,
    pub format_applier_override: FormatApplierOverride,
    pub additional_format_appliers: AdditionalFormatAppliers,
    pub base_model_handlers: Option<ModelHandlerMap>,
    pub base_format_handlers: Option<FormatHandlerMap>,
}

/// State of one model to DOM pass.
pub struct ModelToDomContext {
    pub is_dark_mode: bool,
    pub dark_color_handler: Option<SharedDarkColorHandler>,
    pub default_format: SegmentFormat,
    pub implicit_format: ImplicitFormat,
    pub list_format: ModelToDomListFormat,
    /// Direction of the format being applied, if it has one.
    pub current_direction: Option<Direction>,
    pub on_node_created: Option<OnNodeCreated>,
    pub settings: Rc<ModelToDomSettings>,
}

impl fmt::Debug for ModelToDomContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelToDomContext")
            .field("is_dark_mode", &self.is_dark_mode)
            .field("implicit_format", &self.implicit_format)
            .field("list_format", &self.list_format)
            .field("current_direction", &self.current_direction)
            .finish_non_exhaustive()
    }
}

impl ModelToDomContext {
    /// Write a text or background color, registering dark mode pairs as needed.
    pub fn write_color(&mut self, element: &Handle, color: &str, is_background: bool) {
        match &self.dark_color_handler {
            Some(handler) => {
                let mut handler = handler.borrow_mut();
                set_color(
                    element,
                    Some(color),
                    is_background,
                    self.is_dark_mode,
                    Some(&mut *handler),
                );
            }
            None => set_color(element, Some(color), is_background, self.is_dark_mode, None),
        }
    }

    /// Run `f` with the implicit format of a `tag` element, then restore it.
    pub fn stack_implicit_format<R>(&mut self, tag: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let entered = self.implicit_format.enter(tag);
        self.with_implicit_format(entered, f)
    }

    /// Run `f` with `implicit_format` in place, then restore the previous one.
    pub fn with_implicit_format<R>(
        &mut self,
        implicit_format: ImplicitFormat,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = std::mem::replace(&mut self.implicit_format, implicit_format);
        let result = f(self);
        self.implicit_format = saved;
        result
    }

    pub fn node_created(&self, kind: ModelNodeKind, node: &Handle) {
        if let Some(callback) = &self.on_node_created {
            callback(kind, node);
        }
    }
}

pub fn create_model_to_dom_context(
    editor_context: Option<EditorContext>,
    option: ModelToDomOption,
) -> ModelToDomContext {
    let editor_context = editor_context.unwrap_or_default();
    let settings = ModelToDomSettings {
        format_handlers: option.base_format_handlers.unwrap_or_default(),
        format_appliers: FormatAppliers::build(
            &option.format_applier_override,
            &option.additional_format_appliers,
        ),
        model_handlers: option
            .base_model_handlers
            .unwrap_or_default()
            .with_override(&option.model_handler_override),
    };

    ModelToDomContext {
        is_dark_mode: editor_context.is_dark_mode,
        dark_color_handler: editor_context.dark_color_handler,
        implicit_format: ImplicitFormat::default()
            .with_segment_format(&editor_context.default_format),
        default_format: editor_context.default_format,
        list_format: ModelToDomListFormat::default(),
        current_direction: None,
        on_node_created: option.on_node_created,
        settings: Rc::new(settings),
    }
}
