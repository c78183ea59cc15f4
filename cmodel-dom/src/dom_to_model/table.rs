//! `table` processor.
//!
//! The table is read into a full grid: a cell covered by another cell's `colspan`/`rowspan` is
//! kept as an empty placeholder flagged `span_left`/`span_above`.

use super::process_child_nodes;
use crate::context::{DomToModelContext, DomToModelSettings};
use crate::dom::{child_nodes, get_attribute, get_style, tag_name};
use crate::format::{parse_format, BlockFormat, TableColumnFormat};
use crate::model::{Block, Table, TableCell, TableRow};
use crate::utils::unit::{parse_value_with_unit, ResultUnit};
use markup5ever_rcdom::Handle;
use std::rc::Rc;

fn children_with_tag(element: &Handle, tags: &[&str]) -> Vec<Handle> {
    child_nodes(element)
        .into_iter()
        .filter(|child| {
            tag_name(child)
                .as_deref()
                .is_some_and(|tag| tags.contains(&tag))
        })
        .collect()
}

/// `tr` elements of a table in document order, through `thead`/`tbody`/`tfoot`.
fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in child_nodes(table) {
        match tag_name(&child).as_deref() {
            Some("tr") => rows.push(child),
            Some("thead" | "tbody" | "tfoot") => rows.extend(children_with_tag(&child, &["tr"])),
            _ => {}
        }
    }
    rows
}

fn span_of(cell: &Handle, attribute: &str) -> usize {
    get_attribute(cell, attribute)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn length_in_px(value: Option<String>) -> f64 {
    value
        .map(|value| parse_value_with_unit(&value, None, ResultUnit::Px))
        .unwrap_or_default()
}

fn column_widths(
    table: &Handle,
    settings: &DomToModelSettings,
    context: &mut DomToModelContext,
) -> Vec<f64> {
    let mut columns = children_with_tag(table, &["col"]);
    for group in children_with_tag(table, &["colgroup"]) {
        columns.extend(children_with_tag(&group, &["col"]));
    }
    columns
        .iter()
        .map(|col| {
            let mut format = TableColumnFormat::default();
            parse_format(col, &settings.format_parsers.table_column, &mut format, context);
            length_in_px(format.size.width)
        })
        .collect()
}

fn cell_processor(
    element: &Handle,
    settings: &DomToModelSettings,
    context: &mut DomToModelContext,
) -> TableCell {
    let mut cell = TableCell {
        is_header: tag_name(element).as_deref() == Some("th"),
        ..TableCell::default()
    };

    context.stack_format(|context| {
        parse_format(element, &settings.format_parsers.table_cell, &mut cell.format, context);
        parse_format(element, &settings.format_parsers.dataset, &mut cell.dataset, context);

        let mut segment_format = context.segment_format.clone();
        parse_format(
            element,
            &settings.format_parsers.segment_on_table_cell,
            &mut segment_format,
            context,
        );
        context.segment_format = segment_format;
        context.block_format = BlockFormat::default();

        process_child_nodes(&mut cell.blocks, element, context);
    });
    cell
}

pub fn table_processor(group: &mut Vec<Block>, element: &Handle, context: &mut DomToModelContext) {
    let settings = Rc::clone(&context.settings);
    let mut table = Table::default();

    context.stack_format(|context| {
        parse_format(element, &settings.format_parsers.table, &mut table.format, context);
        parse_format(element, &settings.format_parsers.dataset, &mut table.dataset, context);
        table.widths = column_widths(element, &settings, context);

        let rows = table_rows(element);
        let mut grid: Vec<Vec<Option<TableCell>>> = vec![Vec::new(); rows.len()];

        for (row_index, tr) in rows.iter().enumerate() {
            let mut row = TableRow {
                height: length_in_px(
                    get_style(tr, "height").or_else(|| get_attribute(tr, "height")),
                ),
                ..TableRow::default()
            };
            parse_format(tr, &settings.format_parsers.table_row, &mut row.format, context);
            table.rows.push(row);

            for td in children_with_tag(tr, &["td", "th"]) {
                let column = grid[row_index]
                    .iter()
                    .position(Option::is_none)
                    .unwrap_or(grid[row_index].len());
                let colspan = span_of(&td, "colspan");
                let rowspan = span_of(&td, "rowspan").min(rows.len() - row_index);
                let cell = cell_processor(&td, &settings, context);

                for (r, grid_row) in grid[row_index..row_index + rowspan].iter_mut().enumerate() {
                    if grid_row.len() < column + colspan {
                        grid_row.resize(column + colspan, None);
                    }
                    for c in 0..colspan {
                        if r > 0 || c > 0 {
                            grid_row[column + c] = Some(TableCell {
                                is_header: cell.is_header,
                                span_left: c > 0,
                                span_above: r > 0,
                                ..TableCell::default()
                            });
                        }
                    }
                }
                grid[row_index][column] = Some(cell);
            }
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        for (row, cells) in table.rows.iter_mut().zip(grid) {
            row.cells = cells.into_iter().map(Option::unwrap_or_default).collect();
            row.cells.resize_with(width, TableCell::default);
        }
    });

    group.push(Block::Table(table));
}
