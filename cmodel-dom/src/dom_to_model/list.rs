//! `ol`/`ul` and `li` processors.
//!
//! Lists are flattened: every `li` becomes one [`ListItem`] carrying all the levels it is nested
//! in. Items of a nested list follow the item whose `li` contains them.

use super::block::{block_processor, inherit_segment_format};
use super::process_child_nodes;
use crate::context::DomToModelContext;
use crate::dom::tag_name;
use crate::format::{parse_format, DatasetFormat, ListItemFormat, ListLevelFormat};
use crate::model::{Block, ListItem, ListLevel, ListType};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

pub fn list_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let Some(list_type) = tag_name(element).and_then(|tag| ListType::from_tag(&tag)) else {
        return;
    };
    let settings = Rc::clone(&context.settings);

    context.stack_format(|context| {
        let mut format = ListLevelFormat {
            direction: context.block_format.direction.clone(),
            text_align: context.block_format.text_align.clone(),
            ..ListLevelFormat::default()
        };
        parse_format(element, &settings.format_parsers.list_level, &mut format, context);

        let mut dataset = DatasetFormat::default();
        parse_format(element, &settings.format_parsers.dataset, &mut dataset, context);
        inherit_segment_format(element, context);

        context.list_format.levels.push(ListLevel {
            list_type,
            format,
            dataset,
        });
        process_child_nodes(group, element, context);
        context.list_format.levels.pop();
    });
}

pub fn list_item_processor(
    group: &mut Vec<Block>,
    element: &Handle,
    context: &mut DomToModelContext,
) {
    if context.list_format.levels.is_empty() {
        block_processor(group, element, context);
        return;
    }
    let settings = Rc::clone(&context.settings);
    let levels = context.list_format.levels.clone();
    let depth = levels.len() - 1;

    if levels[depth].list_type == ListType::Ol {
        let counts = &mut context.list_format.thread_item_counts;
        if counts.len() <= depth {
            counts.resize(depth + 1, 0);
        }
        counts[depth] += 1;
    }
    // A start number applies to the first item only.
    for level in &mut context.list_format.levels {
        level.format.list_level_thread.start_number_override = None;
    }

    context.stack_format(|context| {
        let mut format = ListItemFormat::default();
        parse_format(element, &settings.format_parsers.list_item_element, &mut format, context);
        inherit_segment_format(element, context);
        context.block_format = format.inheritable_block_format();

        let mut blocks = Vec::new();
        process_child_nodes(&mut blocks, element, context);
        let (nested, blocks): (Vec<Block>, Vec<Block>) = blocks
            .into_iter()
            .partition(|block| matches!(block, Block::ListItem(_)));

        group.push(Block::ListItem(ListItem {
            levels,
            blocks,
            format,
            format_holder: context.segment_format.clone(),
        }));
        group.extend(nested);
    });
}
