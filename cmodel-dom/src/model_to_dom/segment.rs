//! Segment handlers. Every segment is written as a `span` holding its content; character
//! formats are applied to the span, links and code wrap the span's content.

use crate::context::{ImplicitFormat, ModelNodeKind, ModelToDomContext};
use crate::dom::{
    append_child, create_element, create_text, set_attribute, wrap_all_child_nodes,
};
use crate::format::apply_format;
use crate::model::{Br, Code, Image, Link, Segment, Text};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

pub fn handle_segment(segment: &Segment, parent: &Handle, context: &mut ModelToDomContext) {
    let handlers = context.settings.model_handlers;
    match segment {
        Segment::Text(text) => (handlers.text)(text, parent, context),
        Segment::Br(br) => (handlers.br)(br, parent, context),
        Segment::Image(image) => (handlers.image)(image, parent, context),
        Segment::Entity(entity) => (handlers.entity)(entity, parent, context),
    }
}

/// Implicit format of content inside the link and code wrappers of a segment.
fn decorated_implicit_format(
    context: &ModelToDomContext,
    link: Option<&Link>,
    code: Option<&Code>,
) -> ImplicitFormat {
    let mut implicit = context.implicit_format.clone();
    if link.is_some() {
        implicit = implicit.enter("a");
    }
    if code.is_some() {
        implicit = implicit.enter("code");
    }
    implicit
}

/// Wrap the content of `element` in `code` and then `a`, applying their formats.
fn apply_decorators(
    element: &Handle,
    link: Option<&Link>,
    code: Option<&Code>,
    context: &mut ModelToDomContext,
) {
    let settings = Rc::clone(&context.settings);
    if let Some(code) = code {
        let wrapper = wrap_all_child_nodes(element, "code");
        context.stack_implicit_format("code", |context| {
            apply_format(&wrapper, &settings.format_appliers.code, &code.format, context);
        });
    }
    if let Some(link) = link {
        let wrapper = wrap_all_child_nodes(element, "a");
        context.stack_implicit_format("a", |context| {
            apply_format(&wrapper, &settings.format_appliers.link, &link.format, context);
            apply_format(&wrapper, &settings.format_appliers.dataset, &link.dataset, context);
        });
    }
}

pub fn handle_text(text: &Text, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let span = create_element("span");
    append_child(&span, create_text(&text.text));
    append_child(parent, span.clone());

    let implicit = decorated_implicit_format(context, text.link.as_ref(), text.code.as_ref());
    context.with_implicit_format(implicit, |context| {
        apply_format(&span, &settings.format_appliers.segment, &text.format, context);
    });
    apply_decorators(&span, text.link.as_ref(), text.code.as_ref(), context);

    context.node_created(ModelNodeKind::Text, &span);
}

pub fn handle_br(br: &Br, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let span = create_element("span");
    append_child(&span, create_element("br"));
    append_child(parent, span.clone());

    apply_format(&span, &settings.format_appliers.segment, &br.format, context);
    context.node_created(ModelNodeKind::Br, &span);
}

pub fn handle_image(image: &Image, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let img = create_element("img");
    set_attribute(&img, "src", &image.src);
    if let Some(alt) = &image.alt {
        set_attribute(&img, "alt", alt);
    }
    if let Some(title) = &image.title {
        set_attribute(&img, "title", title);
    }

    let span = create_element("span");
    append_child(&span, img.clone());
    append_child(parent, span.clone());

    apply_format(&img, &settings.format_appliers.image, &image.format, context);
    apply_format(&img, &settings.format_appliers.dataset, &image.dataset, context);

    let implicit = decorated_implicit_format(context, image.link.as_ref(), None);
    context.with_implicit_format(implicit, |context| {
        apply_format(&span, &settings.format_appliers.segment, &image.segment_format, context);
    });
    apply_decorators(&span, image.link.as_ref(), None, context);

    context.node_created(ModelNodeKind::Image, &img);
}
