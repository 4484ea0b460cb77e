// File: ./src/model/parser.rs
//! Timetable grid parser.
//!
//! Layout handled here:
//! - a day-header row: `"Lundi 15/9 29/9 13/10 ..."` in column 0 (one date per week);
//! - a `matin` / `après-midi` row, possibly preceded by a row holding the course name;
//! - up to a few rows of course / professor / exam notes below it;
//! - weeks laid out as (data, spacer) column pairs starting at column 1.
use crate::model::grid::{Cell, cell_text, first_cell};
use crate::model::item::{EXAM_MARKER, TimetableEntry};
use crate::model::vocab::{DEFAULT_TIME_SLOT_LABELS, DEFAULT_VOCABULARY, Vocabulary};
use std::collections::HashMap;

/// Rows gathered after a time-slot row, the time-slot row included.
pub const MAX_GROUP_ROWS: usize = 6;

/// Uppercase first letter means a professor name (`"SMITH John"`); anything
/// else continues the course name on a new line.
pub fn looks_like_professor_name(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

pub fn is_exam_note(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("examen") || lower.contains("exam")
}

/// Turns the stacked cells of one column into `(course, professor)`.
pub fn classify_column(items: &[&str]) -> Option<(String, String)> {
    match items {
        [] => None,
        [only] => Some((only.to_string(), String::new())),
        [first, second, extras @ ..] => {
            let (mut course, mut professor) = if looks_like_professor_name(second) {
                (first.to_string(), second.to_string())
            } else {
                (format!("{} {}", first, second), String::new())
            };

            for extra in extras {
                if is_exam_note(extra) {
                    course = format!("{} {}", course, EXAM_MARKER);
                } else if looks_like_professor_name(extra) && !extra.contains("Droit du") {
                    // Always the first extra line, whichever one matched.
                    professor = items[2].to_string();
                }
            }
            Some((course, professor))
        }
    }
}

#[derive(Debug, Default)]
struct ScanState {
    current_day: Option<String>,
    weeks: Vec<String>,
}

impl ScanState {
    fn week_label(&self, index: usize) -> String {
        self.weeks
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Week {}", index + 1))
    }
}

#[derive(Debug, Clone)]
pub struct TimetableParser<'a> {
    vocab: &'a Vocabulary,
    /// Keyed by trimmed, lowercased token.
    time_slot_labels: HashMap<String, String>,
}

impl Default for TimetableParser<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_VOCABULARY, &DEFAULT_TIME_SLOT_LABELS)
    }
}

impl<'a> TimetableParser<'a> {
    pub fn new(vocab: &'a Vocabulary, time_slot_labels: &HashMap<String, String>) -> Self {
        let time_slot_labels = time_slot_labels
            .iter()
            .map(|(token, label)| (token.trim().to_lowercase(), label.clone()))
            .collect();
        Self {
            vocab,
            time_slot_labels,
        }
    }

    pub fn parse(&self, grid: &[Vec<Cell>]) -> Vec<TimetableEntry> {
        let mut entries = Vec::new();
        if grid.len() < 2 {
            return entries;
        }

        let mut state = ScanState::default();
        let mut cursor = 0;
        while cursor < grid.len() {
            cursor = self.step(grid, cursor, &mut state, &mut entries);
        }

        log::debug!("Parsed {} timetable entries from {} rows", entries.len(), grid.len());
        entries
    }

    /// Handles the row at `cursor` and returns the index of the next row to look at.
    fn step(
        &self,
        grid: &[Vec<Cell>],
        cursor: usize,
        state: &mut ScanState,
        out: &mut Vec<TimetableEntry>,
    ) -> usize {
        let first = first_cell(&grid[cursor]);
        if first.is_empty() {
            return cursor + 1;
        }

        if let Some(day) = self.vocab.match_day(first) {
            state.current_day = Some(day.to_string());
            state.weeks = first
                .split_whitespace()
                .skip(1)
                .filter(|part| part.contains('/'))
                .map(str::to_string)
                .collect();
            log::debug!("Day header '{}' with {} week(s)", day, state.weeks.len());
            return cursor + 1;
        }

        if self.vocab.is_time_slot(first) {
            let Some(day) = state.current_day.clone() else {
                log::trace!("Time slot row {} before any day header, skipped", cursor);
                return cursor + 1;
            };

            let label = self
                .time_slot_labels
                .get(&first.to_lowercase())
                .cloned()
                .unwrap_or_else(|| first.to_string());

            let (group, next) = self.collect_row_group(grid, cursor);
            let before = out.len();
            self.emit_group(&group, &day, &label, state, out);
            log::trace!(
                "Row group {}..{} ({}, {}) gave {} entries",
                cursor,
                next,
                day,
                label,
                out.len() - before
            );
            return next;
        }

        cursor + 1
    }

    /// Rows belonging to the time slot at `slot_idx`, and the index just past them.
    fn collect_row_group<'g>(
        &self,
        grid: &'g [Vec<Cell>],
        slot_idx: usize,
    ) -> (Vec<&'g [Cell]>, usize) {
        let mut group: Vec<&[Cell]> = Vec::new();

        // The course name may sit one row above the time-slot marker.
        if slot_idx > 0 {
            let prev = &grid[slot_idx - 1];
            let prev_first = first_cell(prev);
            if !self.vocab.is_day_header(prev_first) && !self.vocab.is_time_slot(prev_first) {
                group.push(prev);
            }
        }

        let mut next = slot_idx;
        while next < grid.len() {
            let row = &grid[next];
            let label = first_cell(row);

            if self.vocab.is_time_slot(label) {
                if next != slot_idx {
                    break;
                }
            } else if self.vocab.is_day_header(label) {
                break;
            }

            group.push(row);
            next += 1;

            if next - slot_idx >= MAX_GROUP_ROWS {
                break;
            }
        }

        (group, next)
    }

    fn emit_group(
        &self,
        group: &[&[Cell]],
        day: &str,
        time_slot: &str,
        state: &ScanState,
        out: &mut Vec<TimetableEntry>,
    ) {
        let width = group.iter().map(|row| row.len()).max().unwrap_or(0);

        for col in 1..width {
            let column_data: Vec<&str> = group
                .iter()
                .map(|row| cell_text(row, col))
                .filter(|text| !text.is_empty())
                .collect();

            let Some((course, professor)) = classify_column(&column_data) else {
                continue;
            };
            if course.is_empty() {
                continue;
            }

            out.push(TimetableEntry {
                day: day.to_string(),
                time_slot: time_slot.to_string(),
                week: state.week_label((col - 1) / 2),
                course,
                professor,
            });
        }
    }
}

/// Parses `grid` with the default vocabulary. `time_slots` replaces the default
/// token → label map when given; tokens missing from it keep their raw text.
pub fn parse_timetable(
    grid: &[Vec<Cell>],
    time_slots: Option<&HashMap<String, String>>,
) -> Vec<TimetableEntry> {
    let labels = time_slots.unwrap_or(&DEFAULT_TIME_SLOT_LABELS);
    TimetableParser::new(&DEFAULT_VOCABULARY, labels).parse(grid)
}
