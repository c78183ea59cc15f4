//! Inline processors: formatting elements, links, code, text, `br` and `img`.

use super::block::{block_processor, is_block_element};
use super::{add_segment, last_paragraph, process_child_nodes};
use crate::context::DomToModelContext;
use crate::dom::{get_attribute, text_of};
use crate::format::{parse_format, CodeFormat, DatasetFormat, HyperLinkFormat, ImageFormat};
use crate::model::{Block, Br, Code, Image, Link, Segment, Text};
use markup5ever_rcdom::Handle;
use once_cell::sync::Lazy;
use regex::Regex;
use std::rc::Rc;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\r\x0C]+").expect("valid whitespace pattern"));

/// Fallback for tags without a processor of their own.
pub fn generic_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    if is_block_element(element) {
        block_processor(group, element, context);
    } else {
        segment_processor(group, element, context);
    }
}

/// Inline formatting element: its segment format applies to everything inside it.
pub fn segment_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    context.stack_format(|context| {
        let mut format = context.segment_format.clone();
        parse_format(element, &settings.format_parsers.segment, &mut format, context);
        context.segment_format = format;
        process_child_nodes(group, element, context);
    });
}

/// `a`: a link decoration for every segment inside, when the anchor is a link or a named target.
pub fn link_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    context.stack_format(|context| {
        let mut format = HyperLinkFormat::default();
        parse_format(element, &settings.format_parsers.link, &mut format, context);
        if !format.link.is_empty() {
            let mut dataset = DatasetFormat::default();
            parse_format(element, &settings.format_parsers.dataset, &mut dataset, context);
            context.link = Some(Link { format, dataset });
        }
        segment_processor(group, element, context);
    });
}

pub fn code_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    context.stack_format(|context| {
        let mut format = CodeFormat::default();
        parse_format(element, &settings.format_parsers.code, &mut format, context);
        context.code = Some(Code { format });
        segment_processor(group, element, context);
    });
}

pub fn br_processor(group: &mut Vec<Block>, _element: &Handle, context: &mut DomToModelContext) {
    let br = Br {
        format: context.segment_format.clone(),
    };
    add_segment(group, Segment::Br(br), context);
}

pub fn image_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let mut format = ImageFormat::default();
    parse_format(element, &settings.format_parsers.image, &mut format, context);
    let mut dataset = DatasetFormat::default();
    parse_format(element, &settings.format_parsers.dataset, &mut dataset, context);

    let image = Image {
        src: get_attribute(element, "src").unwrap_or_default(),
        alt: get_attribute(element, "alt"),
        title: get_attribute(element, "title"),
        format,
        segment_format: context.segment_format.clone(),
        dataset,
        link: context.link.clone(),
    };
    add_segment(group, Segment::Image(image), context);
}

/// Text nodes.
///
/// Outside `white-space: pre*` runs of whitespace collapse to one space, and a space at the
/// start of a line or after another space is dropped. Text continues the previous text segment
/// when format, link and code all match.
pub fn text_processor(group: &mut Vec<Block>, node: &Handle, context: &mut DomToModelContext) {
    let Some(raw) = text_of(node) else {
        return;
    };
    let preserve = context
        .block_format
        .white_space
        .white_space
        .as_deref()
        .is_some_and(|value| value.starts_with("pre"));

    let text = if preserve {
        raw
    } else {
        let collapsed = WHITESPACE_RUN.replace_all(&raw, " ");
        if follows_space_or_line_start(group) {
            collapsed.trim_start_matches(' ').to_string()
        } else {
            collapsed.into_owned()
        }
    };
    if text.is_empty() {
        return;
    }

    let format = context.segment_format.clone();
    let paragraph = last_paragraph(group, context);
    if let Some(Segment::Text(last)) = paragraph.segments.last_mut() {
        if last.format == format && last.link == context.link && last.code == context.code {
            last.text.push_str(&text);
            return;
        }
    }
    paragraph.segments.push(Segment::Text(Text {
        text,
        format,
        link: context.link.clone(),
        code: context.code.clone(),
    }));
}

fn follows_space_or_line_start(group: &[Block]) -> bool {
    let Some(Block::Paragraph(paragraph)) = group.last() else {
        return true;
    };
    match paragraph.segments.last() {
        None | Some(Segment::Br(_)) => true,
        Some(Segment::Text(text)) => text.text.ends_with(' '),
        Some(_) => false,
    }
}
