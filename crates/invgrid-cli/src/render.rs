//! Table rendering for the demo CLI.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::Value;

use invgrid_gateway::Row;
use invgrid_table::PageWindow;

/// Render one page of rows. Columns are the first row's keys, in key
/// order; later rows missing a key render an empty cell.
pub fn page_table(rows: &[Row]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let Some(first) = rows.first() else {
        table.set_header(vec![Cell::new("(no rows)")]);
        return table;
    };
    let columns: Vec<&String> = first.keys().collect();
    table.set_header(columns.iter().map(|column| Cell::new(column)));
    for row in rows {
        table.add_row(
            columns
                .iter()
                .map(|column| Cell::new(cell_text(row.get(column.as_str())))),
        );
    }
    table
}

/// Pagination footer in the `start-end of total` style.
pub fn footer(window: PageWindow) -> String {
    if window.total == 0 {
        return "0 records".to_string();
    }
    format!("{}-{} of {}", window.start, window.end, window.total)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn footer_formats_window() {
        assert_eq!(
            footer(PageWindow {
                start: 11,
                end: 20,
                total: 43
            }),
            "11-20 of 43"
        );
        assert_eq!(
            footer(PageWindow {
                start: 0,
                end: 0,
                total: 0
            }),
            "0 records"
        );
    }

    #[test]
    fn table_renders_cells_and_blanks() {
        let rows = vec![
            row(json!({"id": "1", "name": "Widget", "qty": 4})),
            row(json!({"id": "2", "qty": 7})),
        ];
        let rendered = page_table(&rows).to_string();
        assert!(rendered.contains("Widget"));
        assert!(rendered.contains("name"));
        assert!(rendered.contains('7'));
    }
}
