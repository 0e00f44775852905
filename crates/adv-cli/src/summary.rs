use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use adv_cli::types::ExportResult;
use adv_transform::ContributionRow;

pub fn print_export_summary(result: &ExportResult) {
    println!("Dataset: {}", result.dataset);
    println!("Output: {}", result.output.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("File"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_rows = 0usize;
    for input in &result.inputs {
        total_rows += input.rows;
        table.add_row(vec![
            Cell::new(&input.label).add_attribute(Attribute::Bold),
            dim_cell(input.path.display()),
            count_cell(input.rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("OUTPUT")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} columns", result.columns)),
        Cell::new(result.rows)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let dropped = total_rows.saturating_sub(result.rows);
    if dropped > 0 && result.inputs.len() > 1 {
        println!("{dropped} input row(s) not carried into the output");
    }
}

pub fn print_contribution_table(column: &str, rows: &[ContributionRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(column),
        header_cell("Count"),
        header_cell("% Contribution"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for row in rows {
        let value = if row.value.is_empty() {
            dim_cell("(blank)")
        } else {
            Cell::new(&row.value)
        };
        table.add_row(vec![
            value,
            Cell::new(row.count),
            Cell::new(format!("{:.2}", row.percent)),
        ]);
    }
    let total: u64 = rows.iter().map(|row| row.count).sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
        dim_cell("100.00"),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
