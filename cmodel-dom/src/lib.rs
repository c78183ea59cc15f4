//! Conversion between HTML DOM trees and a structured content model
//!
//!     This crate reads an HTML fragment into a Content Model (a serializable tree of blocks and
//!     segments, each carrying a closed format struct) and writes a Content Model back out as
//!     HTML. It is a pure library: nothing here prints, reads env vars or touches the filesystem.
//!     The `cmodel` CLI is the shell around it.
//!
//! Architecture
//!
//!     The conversion is table driven, in two layers:
//!
//!     - Format handlers: one parse/apply pair per format key (margin, bold, list numbering, ...).
//!       Each structural category owns an ordered list of keys, so parsing or applying the format
//!       of a paragraph, a table cell or a text run is a walk over that list. See [`format`] and
//!       [`registry`].
//!     - Element processors and model handlers: the tree walkers. DomToModel dispatches DOM
//!       elements by tag to processors ([`dom_to_model`]); ModelToDom dispatches model nodes by
//!       kind to handlers ([`model_to_dom`]). Both maps can be overridden per call.
//!
//!     All state of one pass lives in an explicitly created context ([`context`]) passed by
//!     `&mut` through every processor, handler and format function. There is no global state.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── dom                     # rcdom element and inline style helpers
//!     ├── utils                   # units, colors, dark color registry, entity class names
//!     ├── default_style.rs        # browser default style per tag
//!     ├── format                  # format slices, category structs, handlers, overrides
//!     ├── registry.rs             # FormatHandlerMap
//!     ├── context                 # editor, DomToModel and ModelToDom contexts
//!     ├── model                   # the Content Model tree
//!     ├── dom_to_model            # element processors
//!     └── model_to_dom            # model handlers
//!
//! Testing
//!
//!     Handlers and processors are unit tested next to their code. End to end conversions live
//!     under tests/, collected by tests/lib.rs.

pub mod context;
pub mod default_style;
pub mod dom;
pub mod dom_to_model;
pub mod error;
pub mod format;
pub mod model;
pub mod model_to_dom;
pub mod registry;
pub mod utils;

pub use context::{
    create_dom_to_model_context, create_model_to_dom_context, DomToModelContext,
    DomToModelOption, EditorContext, ModelToDomContext, ModelToDomOption,
};
pub use error::ConvertError;
pub use model::Document;
pub use registry::FormatHandlerMap;
pub use utils::{DarkColorHandler, DarkColorRegistry};

/// Read an HTML fragment (or full document) into a Content Model.
pub fn html_to_model(html: &str, editor_context: Option<EditorContext>) -> Document {
    let root = dom::parse_html(html);
    let mut context = create_dom_to_model_context(editor_context, DomToModelOption::default());
    dom_to_model::dom_to_model(&root, &mut context)
}

/// Write a Content Model as an HTML fragment.
///
/// Without an editor context, the document's own default format is used as the implicit format.
pub fn model_to_html(
    document: &Document,
    editor_context: Option<EditorContext>,
) -> Result<String, ConvertError> {
    let editor_context = editor_context
        .unwrap_or_else(|| EditorContext::new().with_default_format(document.format.clone()));
    let mut context = create_model_to_dom_context(Some(editor_context), ModelToDomOption::default());
    let root = dom::create_element("div");
    model_to_dom::model_to_dom(document, &root, &mut context);
    dom::serialize_children(&root)
}

/// Serialize a Content Model to JSON.
pub fn model_to_json(document: &Document, pretty: bool) -> Result<String, ConvertError> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Read a Content Model from JSON.
pub fn model_from_json(json: &str) -> Result<Document, ConvertError> {
    Ok(serde_json::from_str(json)?)
}
