//! List handlers.
//!
//! A run of list items shares the node stack of the context: the list parent followed by one
//! open `ol`/`ul` per level. Each item reuses the open lists matching its leading levels and
//! opens new ones for the rest.

use crate::context::{ListNode, ModelNodeKind, ModelToDomContext};
use crate::dom::{append_child, child_nodes, create_element, tag_name};
use crate::format::apply_format;
use crate::model::{ListItem, ListLevel, ListType};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

/// Whether the open list `node` can hold items of `level`.
fn can_reuse(node: &ListNode, level: &ListLevel) -> bool {
    node.list_type == Some(level.list_type)
        && !(level.list_type == ListType::Ol
            && level.format.list_level_thread.start_number_override.is_some())
}

/// Where a list opened under `node` goes: inside its last `li`, or into the node itself.
fn list_container(node: &ListNode) -> Handle {
    if node.list_type.is_none() {
        return node.node.clone();
    }
    child_nodes(&node.node)
        .into_iter()
        .rev()
        .find(|child| tag_name(child).as_deref() == Some("li"))
        .unwrap_or_else(|| node.node.clone())
}

/// Open the list elements `item` needs, reusing the ones already open.
pub fn handle_list(item: &ListItem, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    let stack = &mut context.list_format.node_stack;
    if stack.is_empty() {
        stack.push(ListNode {
            node: parent.clone(),
            list_type: None,
            format: Default::default(),
            dataset: Default::default(),
        });
    }

    let layer = item
        .levels
        .iter()
        .zip(stack.iter().skip(1))
        .take_while(|(level, node)| can_reuse(node, level))
        .count();
    stack.truncate(layer + 1);

    for level in &item.levels[layer..] {
        let tag = level.list_type.tag_name();
        let list = create_element(tag);
        if let Some(host) = context.list_format.node_stack.last() {
            append_child(&list_container(host), list.clone());
        }
        context.list_format.node_stack.push(ListNode {
            node: list.clone(),
            list_type: Some(level.list_type),
            format: level.format.clone(),
            dataset: level.dataset.clone(),
        });

        context.stack_implicit_format(tag, |context| {
            apply_format(&list, &settings.format_appliers.list_level, &level.format, context);
            apply_format(&list, &settings.format_appliers.dataset, &level.dataset, context);
        });
        context.node_created(ModelNodeKind::ListLevel, &list);
    }
}

pub fn handle_list_item(item: &ListItem, parent: &Handle, context: &mut ModelToDomContext) {
    let settings = Rc::clone(&context.settings);
    (settings.model_handlers.list)(item, parent, context);

    let Some(list) = context.list_format.node_stack.last().map(|node| node.node.clone()) else {
        return;
    };
    let li = create_element("li");
    append_child(&list, li.clone());

    if item.levels.last().map(|level| level.list_type) == Some(ListType::Ol) {
        if let Some(depth) = context.list_format.node_stack.len().checked_sub(2) {
            let counts = &mut context.list_format.thread_item_counts;
            if counts.len() <= depth {
                counts.resize(depth + 1, 0);
            }
            counts[depth] += 1;
        }
    }

    context.stack_implicit_format("li", |context| {
        apply_format(&li, &settings.format_appliers.list_item_element, &item.format, context);

        let implicit = context.implicit_format.with_segment_format(&item.format_holder);
        context.with_implicit_format(implicit, |context| {
            (settings.model_handlers.block_group_children)(&item.blocks, &li, context);
        });

        apply_format(
            &li,
            &settings.format_appliers.segment_on_block,
            &item.format_holder,
            context,
        );
    });
    context.node_created(ModelNodeKind::ListItem, &li);
}
