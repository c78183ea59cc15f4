//! `table` handler. Placeholder cells are folded back into `colspan`/`rowspan` of the cell
//! they continue.

use crate::context::{ModelNodeKind, ModelToDomContext};
use crate::dom::{append_child, create_element, set_attribute, set_style};
use crate::format::apply_format;
use crate::model::{Table, TableCell};
use crate::utils::unit::format_px;
use markup5ever_rcdom::Handle;
use std::rc::Rc;

fn col_span(cells: &[TableCell], column: usize) -> usize {
    1 + cells[column + 1..]
        .iter()
        .take_while(|cell| cell.span_left)
        .count()
}

fn row_span(table: &Table, row: usize, column: usize) -> usize {
    1 + table.rows[row + 1..]
        .iter()
        .take_while(|next| next.cells.get(column).is_some_and(|cell| cell.span_above))
        .count()
}

pub fn handle_table(table: &Table, parent: &Handle, context: &mut ModelToDomContext) {
    if table.rows.iter().all(|row| row.cells.is_empty()) {
        return;
    }
    let settings = Rc::clone(&context.settings);
    let element = create_element("table");
    append_child(parent, element.clone());

    context.stack_implicit_format("table", |context| {
        apply_format(&element, &settings.format_appliers.table, &table.format, context);
        apply_format(&element, &settings.format_appliers.dataset, &table.dataset, context);

        if !table.widths.is_empty() {
            let colgroup = create_element("colgroup");
            for width in &table.widths {
                let col = create_element("col");
                set_style(&col, "width", &format_px(*width));
                append_child(&colgroup, col);
            }
            append_child(&element, colgroup);
        }

        let tbody = create_element("tbody");
        append_child(&element, tbody.clone());

        for (row_index, row) in table.rows.iter().enumerate() {
            let tr = create_element("tr");
            append_child(&tbody, tr.clone());
            if row.height > 0.0 {
                set_style(&tr, "height", &format_px(row.height));
            }
            apply_format(&tr, &settings.format_appliers.table_row, &row.format, context);

            for (column, cell) in row.cells.iter().enumerate() {
                if cell.span_left || cell.span_above {
                    continue;
                }
                let tag = if cell.is_header { "th" } else { "td" };
                let td = create_element(tag);
                append_child(&tr, td.clone());

                let colspan = col_span(&row.cells, column);
                let rowspan = row_span(table, row_index, column);
                if colspan > 1 {
                    set_attribute(&td, "colspan", &colspan.to_string());
                }
                if rowspan > 1 {
                    set_attribute(&td, "rowspan", &rowspan.to_string());
                }

                context.stack_implicit_format(tag, |context| {
                    apply_format(&td, &settings.format_appliers.table_cell, &cell.format, context);
                    apply_format(&td, &settings.format_appliers.dataset, &cell.dataset, context);
                    (settings.model_handlers.block_group_children)(&cell.blocks, &td, context);
                });
                context.node_created(ModelNodeKind::TableCell, &td);
            }
            context.node_created(ModelNodeKind::TableRow, &tr);
        }
    });
    context.node_created(ModelNodeKind::Table, &element);
}
