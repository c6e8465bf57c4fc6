use format_csv::{CsvFormatConfig, CsvWriter};
use hub_api::{Direction, SortState, Table};
use storage_memory::FileEntry;

use crate::config::OutputFormat;
use crate::error::HubError;

/// Render a table in the requested output format.
pub fn output(
    table: &Table,
    state: &SortState,
    format: OutputFormat,
    csv: &CsvFormatConfig,
) -> Result<String, HubError> {
    match format {
        OutputFormat::Text => Ok(table_text(table, state)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(table)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => {
            let bytes = CsvWriter::new(csv)?.write_table(table)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Aligned plain-text table. The first column numbers the rows; the
/// active sort column is marked `^` (ascending) or `v` (descending).
pub fn table_text(table: &Table, state: &SortState) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(table.header().iter().map(|column| match state.direction_for(column.as_str()) {
        Some(Direction::Ascending) => format!("{column} ^"),
        Some(Direction::Descending) => format!("{column} v"),
        None => column.clone(),
    }));

    let rows = table
        .cells()
        .enumerate()
        .map(|(i, cells)| {
            let mut row = vec![(i + 1).to_string()];
            row.extend(cells.into_iter().map(escape));
            row
        })
        .collect();

    layout(header, rows)
}

/// Upload list: Item / File Name / Size / Id.
pub fn catalog_text<'a>(entries: impl Iterator<Item = &'a FileEntry>) -> String {
    let rows: Vec<Vec<String>> = entries
        .enumerate()
        .map(|(i, e)| vec![(i + 1).to_string(), e.name.clone(), e.size.to_string(), e.id.to_string()])
        .collect();
    if rows.is_empty() {
        return "no files uploaded yet\n".to_string();
    }

    let header = ["Item", "File Name", "Size", "Id"].map(String::from).to_vec();
    layout(header, rows)
}

/// Keep a cell on one line and out of the column padding.
fn escape(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    for c in cell.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn layout(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
