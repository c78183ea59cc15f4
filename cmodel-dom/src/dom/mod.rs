//! Thin element layer over `markup5ever_rcdom`
//!
//! The converters treat an rcdom tree as the live DOM: nodes are reference counted `Handle`s,
//! children live in a `RefCell<Vec<Handle>>` and parents are weak back links. This module keeps
//! that bookkeeping (parent links in particular) in one place so the format handlers can read and
//! write attributes and inline styles without caring about the tree plumbing.

pub mod style;

use crate::error::ConvertError;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute,
    LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub use style::StyleDeclaration;

/// Parse an HTML document or fragment and return its `<body>` element.
///
/// html5ever always synthesizes `html`/`head`/`body`, so fragments end up inside the body too.
/// The body is detached before the document goes away: dropping an rcdom node empties every
/// descendant still attached to it.
pub fn parse_html(html: &str) -> Handle {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    match find_element(&dom.document, "body") {
        Some(body) => {
            detach(&body);
            body
        }
        None => create_element("body"),
    }
}

/// Depth first search for the first element with the given tag name.
pub fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if tag_name(node).as_deref() == Some(tag) {
        return Some(node.clone());
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Create a detached HTML element.
pub fn create_element(tag: &str) -> Handle {
    create_element_with_attrs(tag, vec![])
}

/// Create a detached HTML element with attributes
pub fn create_element_with_attrs(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Append `child` to `parent`, keeping the weak parent link in sync.
pub fn append_child(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Remove `node` from its parent, if it has one.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent_of(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// Snapshot of the children of a node.
pub fn child_nodes(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// Detach and return every child of `node`.
pub fn take_children(node: &Handle) -> Vec<Handle> {
    let children = std::mem::take(&mut *node.children.borrow_mut());
    for child in &children {
        child.parent.set(None);
    }
    children
}

/// Parent of a node, if it is attached and still alive.
pub fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

/// Lower-case tag name of an element, `None` for every other node kind.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_ascii_lowercase().to_string()),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Text content of a text node.
pub fn text_of(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Text { contents } => Some(contents.borrow().to_string()),
        _ => None,
    }
}

pub fn get_attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| (*attr.name.local).eq_ignore_ascii_case(name))
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set (or replace) an attribute. Non-element nodes are left untouched.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs
            .iter_mut()
            .find(|attr| (*attr.name.local).eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = value.to_string().into(),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(name)),
                value: value.to_string().into(),
            }),
        }
    }
}

pub fn remove_attribute(node: &Handle, name: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|attr| !(*attr.name.local).eq_ignore_ascii_case(name));
    }
}

/// Names of all attributes in document order.
pub fn attribute_names(node: &Handle) -> Vec<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| attr.name.local.to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// Whitespace separated tokens of the `class` attribute.
pub fn class_list(node: &Handle) -> Vec<String> {
    get_attribute(node, "class")
        .map(|class| class.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// The element's `data-*` attributes keyed the way `HTMLElement.dataset` keys them
/// (`data-foo-bar` becomes `fooBar`).
pub fn dataset(node: &Handle) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    for name in attribute_names(node) {
        if let Some(raw) = name.to_ascii_lowercase().strip_prefix("data-") {
            if let Some(value) = get_attribute(node, &name) {
                result.insert(dataset_key_from_attribute(raw), value);
            }
        }
    }
    result
}

/// Write a dataset entry back as a `data-*` attribute.
pub fn set_dataset_value(node: &Handle, key: &str, value: &str) {
    set_attribute(node, &format!("data-{}", attribute_from_dataset_key(key)), value);
}

fn dataset_key_from_attribute(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut upper = false;
    for ch in raw.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            key.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            key.push(ch);
        }
    }
    key
}

fn attribute_from_dataset_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}

/// Parsed view of the element's inline `style` attribute.
pub fn style_of(node: &Handle) -> StyleDeclaration {
    get_attribute(node, "style")
        .map(|css| StyleDeclaration::parse(&css))
        .unwrap_or_default()
}

/// Read one inline style property (longhands resolve through shorthands).
pub fn get_style(node: &Handle, property: &str) -> Option<String> {
    style_of(node).get(property)
}

/// Set one inline style property; an empty value removes it.
pub fn set_style(node: &Handle, property: &str, value: &str) {
    let mut style = style_of(node);
    style.set(property, value);
    write_style(node, &style);
}

pub fn remove_style(node: &Handle, property: &str) {
    set_style(node, property, "");
}

fn write_style(node: &Handle, style: &StyleDeclaration) {
    if style.is_empty() {
        remove_attribute(node, "style");
    } else {
        set_attribute(node, "style", &style.to_css());
    }
}

/// Move every child of `element` into a new `tag` wrapper and return the wrapper.
///
/// When the element already holds exactly one bare `tag` child that child is returned instead,
/// so wrapping twice leaves the tree unchanged.
pub fn wrap_all_child_nodes(element: &Handle, tag: &str) -> Handle {
    {
        let children = element.children.borrow();
        if let [only] = children.as_slice() {
            if tag_name(only).as_deref() == Some(tag) && attribute_names(only).is_empty() {
                return only.clone();
            }
        }
    }
    let wrapper = create_element(tag);
    let children = std::mem::take(&mut *element.children.borrow_mut());
    for child in children {
        append_child(&wrapper, child);
    }
    append_child(element, wrapper.clone());
    wrapper
}

/// Whether the element is editable, following `contenteditable` up the ancestor chain the way
/// `HTMLElement.isContentEditable` does.
pub fn is_content_editable(node: &Handle) -> bool {
    let mut current = Some(node.clone());
    while let Some(element) = current {
        if let Some(value) = get_attribute(&element, "contenteditable") {
            match value.to_ascii_lowercase().as_str() {
                "" | "true" | "plaintext-only" => return true,
                "false" => return false,
                _ => {}
            }
        }
        current = parent_of(&element);
    }
    false
}

fn serialize_with_scope(
    output: &mut Vec<u8>,
    node: &Handle,
    traversal_scope: TraversalScope,
) -> Result<(), ConvertError> {
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(output, &serializable, opts)
        .map_err(|e| ConvertError::SerializationError(format!("HTML serialization failed: {e}")))
}

fn into_string(output: Vec<u8>) -> Result<String, ConvertError> {
    String::from_utf8(output)
        .map_err(|e| ConvertError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Serialize the children of `node` to an HTML string.
pub fn serialize_children(node: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    serialize_with_scope(&mut output, node, TraversalScope::ChildrenOnly(None))?;
    into_string(output)
}

/// Serialize `node` itself including its children. The node is left where it is.
pub fn serialize_node(node: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    serialize_with_scope(&mut output, node, TraversalScope::IncludeNode)?;
    into_string(output)
}
