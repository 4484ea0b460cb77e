// File: ./src/model/display.rs
// Terminal rendering of the raw grid and of parsed entries.
use crate::model::grid::Cell;
use crate::model::item::TimetableEntry;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_COLUMN_WIDTH: usize = 40;

pub trait EntryDisplay {
    fn to_listing_line(&self) -> String;
}

impl EntryDisplay for TimetableEntry {
    fn to_listing_line(&self) -> String {
        let prof = if self.professor.is_empty() {
            String::new()
        } else {
            format!(" ({})", self.professor)
        };
        format!(
            "  [{}] Week {}: {}{}",
            self.time_slot, self.week, self.course, prof
        )
    }
}

/// Cuts `s` to at most `width` terminal columns, then pads it to exactly `width`.
fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn flatten(cell: &Cell) -> String {
    cell.as_deref().unwrap_or("").replace(['\n', '\r'], " ")
}

/// Fixed-width dump of the extracted grid, a separator under the first row.
pub fn format_grid(grid: &[Vec<Cell>], max_rows: Option<usize>) -> String {
    if grid.is_empty() {
        return "Empty table\n".to_string();
    }

    let ncols = grid.iter().map(|r| r.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|col| {
            grid.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| flatten(cell).width())
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let shown = match max_rows {
        Some(n) if n > 0 => &grid[..n.min(grid.len())],
        _ => grid,
    };

    let mut out = String::new();
    for (row_idx, row) in shown.iter().enumerate() {
        let line = row
            .iter()
            .enumerate()
            .map(|(i, cell)| fit_to_width(&flatten(cell), widths[i]))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&line);
        out.push('\n');

        if row_idx == 0 {
            out.push_str(&"-".repeat(line.width()));
            out.push('\n');
        }
    }

    if shown.len() < grid.len() {
        out.push_str(&format!("... ({} more rows)\n", grid.len() - shown.len()));
    }
    out
}

/// Entries grouped by day, days in the order they first appear.
pub fn format_entries(entries: &[TimetableEntry]) -> String {
    if entries.is_empty() {
        return "No entries found\n".to_string();
    }

    let mut days: Vec<(&str, Vec<&TimetableEntry>)> = Vec::new();
    for entry in entries {
        match days.iter_mut().find(|(d, _)| *d == entry.day) {
            Some((_, list)) => list.push(entry),
            None => days.push((entry.day.as_str(), vec![entry])),
        }
    }

    let mut out = String::from("\n=== TIMETABLE ENTRIES ===\n");
    for (day, list) in days {
        out.push_str(&format!("\n{}:\n", day));
        out.push_str(&"-".repeat(60));
        out.push('\n');
        for entry in list {
            out.push_str(&entry.to_listing_line());
            out.push('\n');
        }
    }
    out
}
