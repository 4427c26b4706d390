//! Output formatting for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use ivping_core::{HostColumn, HostRecord, SortKey};

/// Build a table with cyan headers.
pub fn build_table(headers: &[String], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }
    table
}

pub fn print_table(headers: &[String], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

/// Column labels, with a direction marker on the sorted column.
pub fn host_headers(sort: Option<SortKey>) -> Vec<String> {
    HostColumn::ALL
        .iter()
        .map(|column| match sort {
            Some(key) if key.column == *column => {
                format!("{} {}", column.label(), key.direction.marker())
            }
            _ => column.label().to_string(),
        })
        .collect()
}

pub fn host_rows<'a>(hosts: impl Iterator<Item = &'a HostRecord>) -> Vec<Vec<String>> {
    hosts
        .map(|host| {
            HostColumn::ALL
                .iter()
                .map(|column| host.field(*column).to_string())
                .collect()
        })
        .collect()
}
