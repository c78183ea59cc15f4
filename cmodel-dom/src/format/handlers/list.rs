//! List numbering and list style handlers.

use crate::context::{DomToModelContext, ModelToDomContext};
use crate::default_style::DefaultStyle;
use crate::dom::{get_attribute, get_style, remove_attribute, set_attribute, set_style, tag_name};
use crate::format::slices::{ListStyleFormat, ListThreadFormat};
use crate::format::FormatHandler;
use markup5ever_rcdom::Handle;

fn is_ordered_list(element: &Handle) -> bool {
    tag_name(element).as_deref() == Some("ol")
}

/// `start` attribute of an `ol`, defaulting to 1.
fn start_number(element: &Handle) -> u32 {
    get_attribute(element, "start")
        .and_then(|start| start.trim().parse::<u32>().ok())
        .unwrap_or(1)
}

pub const LIST_LEVEL_THREAD_HANDLER: FormatHandler<ListThreadFormat> = FormatHandler {
    parse: parse_list_thread,
    apply: apply_list_thread,
};

/// Track ordered list numbering across lists.
///
/// `thread_item_counts[depth]` holds the number of the last item seen at that depth. An `ol`
/// whose `start` continues that count continues the thread. Any other `start` is recorded as an
/// override and restarts the count. Counters deeper than the current list are discarded.
fn parse_list_thread(
    format: &mut ListThreadFormat,
    element: &Handle,
    context: &mut DomToModelContext,
    _default_style: &DefaultStyle,
) {
    if !is_ordered_list(element) {
        return;
    }
    let depth = context.list_format.levels.len();
    let start = start_number(element);
    let counts = &mut context.list_format.thread_item_counts;
    counts.truncate(depth + 1);

    match counts.get(depth).copied() {
        None => {
            counts.resize(depth, 0);
            if start != 1 {
                format.start_number_override = Some(start);
            }
            counts.push(start.saturating_sub(1));
        }
        Some(count) if start != count + 1 => {
            format.start_number_override = Some(start);
            counts[depth] = start.saturating_sub(1);
        }
        Some(_) => {}
    }
}

/// Write `start` from the running counters.
///
/// The node stack holds the list parent followed by every open list element, this one included,
/// so its depth is the stack length minus two.
fn apply_list_thread(format: &ListThreadFormat, element: &Handle, context: &mut ModelToDomContext) {
    if !is_ordered_list(element) {
        return;
    }
    let Some(depth) = context.list_format.node_stack.len().checked_sub(2) else {
        return;
    };
    let counts = &mut context.list_format.thread_item_counts;
    counts.truncate(depth + 1);
    counts.resize(depth + 1, 0);

    let start = format
        .start_number_override
        .unwrap_or_else(|| counts[depth] + 1);
    counts[depth] = start.saturating_sub(1);

    if start == 1 {
        remove_attribute(element, "start");
    } else {
        set_attribute(element, "start", &start.to_string());
    }
}

pub const LIST_STYLE_HANDLER: FormatHandler<ListStyleFormat> = FormatHandler {
    parse: |format, element, _, _| {
        if let Some(position) = get_style(element, "list-style-position") {
            format.list_style_position = Some(position);
        }
        if let Some(style_type) = get_style(element, "list-style-type") {
            format.list_style_type = Some(style_type);
        }
    },
    apply: |format, element, _| {
        if let Some(position) = &format.list_style_position {
            set_style(element, "list-style-position", position);
        }
        if let Some(style_type) = &format.list_style_type {
            set_style(element, "list-style-type", style_type);
        }
    },
};
