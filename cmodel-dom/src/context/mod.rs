//! Conversion contexts
//!
//! A context is created for one conversion pass, threaded by `&mut` through every processor,
//! handler and format parser/applier of that pass, and dropped at the end. It carries the state
//! that makes the format handlers context sensitive: list numbering, inherited formats, the
//! implicit format of the current element and the dark color handler.

pub mod dom_to_model;
pub mod editor;
pub mod model_to_dom;

pub use dom_to_model::{
    create_dom_to_model_context, DomToModelContext, DomToModelListFormat, DomToModelOption,
    DomToModelSettings,
};
pub use editor::{EditorContext, SharedDarkColorHandler};
pub use model_to_dom::{
    create_model_to_dom_context, ImplicitFormat, ListNode, ModelNodeKind, ModelToDomContext,
    ModelToDomListFormat, ModelToDomOption, ModelToDomSettings, OnNodeCreated,
};
