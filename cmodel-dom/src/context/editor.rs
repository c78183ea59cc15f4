use crate::format::SegmentFormat;
use crate::utils::dark_color::DarkColorHandler;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared dark color handler. It belongs to the host editor and outlives conversions.
pub type SharedDarkColorHandler = Rc<RefCell<dyn DarkColorHandler>>;

/// Editor level settings every conversion context starts from.
#[derive(Clone, Default)]
pub struct EditorContext {
    pub is_dark_mode: bool,
    pub dark_color_handler: Option<SharedDarkColorHandler>,
    /// Segment format the editor renders text with when nothing else applies.
    pub default_format: SegmentFormat,
}

impl EditorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_mode(mut self, handler: SharedDarkColorHandler) -> Self {
        self.is_dark_mode = true;
        self.dark_color_handler = Some(handler);
        self
    }

    pub fn with_default_format(mut self, format: SegmentFormat) -> Self {
        self.default_format = format;
        self
    }
}
