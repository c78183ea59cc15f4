//! The Content Model: a serializable document tree sitting between the DOM and editing code.
//!
//! Blocks (paragraphs, list items, tables, dividers, format containers, entities) hold segments
//! (text, line breaks, images, entities). Every node carries the closed format struct of its
//! category, so the tree serializes to flat camelCase JSON objects.

pub mod nodes;
pub mod normalize;

pub use nodes::*;
pub use normalize::normalize;
