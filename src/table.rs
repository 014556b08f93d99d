//! Plain-text table rendering for console output of inference results.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::report::InferenceReport;

const COLUMN_GAP: &str = "  ";
const MAX_CELL_CHARS: usize = 40;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let headers = headers.iter().map(|h| sanitize_cell(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| {
            row.iter()
                .take(headers.len())
                .map(|cell| sanitize_cell(cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut widths = headers
        .iter()
        .map(|h| h.chars().count().max(1))
        .collect::<Vec<_>>();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(&headers, &widths));
    let rule = widths.iter().map(|w| "-".repeat((*w).max(3))).collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule, &rule_widths));
    for row in &rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// One line per column: position, name, type, example, null count and the
/// flags (`empty`, `single`, `unique`, `override`) that apply.
pub fn render_report(report: &InferenceReport) -> String {
    let headers = ["#", "column", "type", "example", "nulls", "flags"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = report
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let flags = [
                (column.is_empty(), "empty"),
                (column.is_single_valued(), "single"),
                (column.is_unique, "unique"),
                (column.was_overridden(), "override"),
            ]
            .into_iter()
            .filter_map(|(set, flag)| set.then_some(flag))
            .join(",");
            vec![
                (idx + 1).to_string(),
                column.name.clone(),
                column.field_type.to_string(),
                column.example.clone().unwrap_or_default(),
                column.null_count.to_string(),
                flags,
            ]
        })
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    values
        .iter()
        .zip(widths.iter().copied())
        .map(|(value, width)| format!("{value:<width$}"))
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Flattens control characters and truncates long cells.
fn sanitize_cell(value: &str) -> String {
    let flattened = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect::<String>();
    if flattened.chars().count() > MAX_CELL_CHARS {
        let mut truncated = flattened.chars().take(MAX_CELL_CHARS - 1).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        flattened
    }
}
