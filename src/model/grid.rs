// File: ./src/model/grid.rs
// The extracted table, as handed over by the PDF table extractor.
use anyhow::{Context, Result, anyhow};
use serde_json::Value;

pub type Cell = Option<String>;
pub type Row = Vec<Cell>;
pub type CellGrid = Vec<Row>;

/// Trimmed text of a cell, empty when absent.
pub fn cell_text(row: &[Cell], col: usize) -> &str {
    row.get(col)
        .and_then(|c| c.as_deref())
        .map(str::trim)
        .unwrap_or("")
}

/// Trimmed text of the label column.
pub fn first_cell(row: &[Cell]) -> &str {
    cell_text(row, 0)
}

/// Loads a grid from a JSON document shaped as `[[string|null, ...], ...]`.
///
/// Numbers and booleans are accepted as text. A row that is not an array (or a
/// cell that is an object/array) cannot be indexed and fails with its row index.
pub fn load_grid_json(json: &str) -> Result<CellGrid> {
    let root: Value = serde_json::from_str(json).context("Grid is not valid JSON")?;
    let rows = match root {
        Value::Array(rows) => rows,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(anyhow!("Grid must be a JSON array of rows")),
    };

    let mut grid = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.into_iter().enumerate() {
        let cells = match row {
            Value::Array(cells) => cells,
            Value::Null => {
                grid.push(Vec::new());
                continue;
            }
            other => {
                return Err(anyhow!(
                    "Row {} is not an array of cells (found {})",
                    row_idx,
                    json_kind(&other)
                ));
            }
        };

        let mut parsed = Vec::with_capacity(cells.len());
        for (col_idx, cell) in cells.into_iter().enumerate() {
            let text = match cell {
                Value::Null => None,
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                other => {
                    return Err(anyhow!(
                        "Row {}, column {}: unsupported cell value ({})",
                        row_idx,
                        col_idx,
                        json_kind(&other)
                    ));
                }
            };
            parsed.push(text);
        }
        grid.push(parsed);
    }
    Ok(grid)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
