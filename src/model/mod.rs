// File: ./src/model/mod.rs
pub mod adapter;
pub mod dates;
pub mod display;
pub mod grid;
pub mod item;
pub mod parser;
pub mod vocab;

pub use adapter::{EventProjector, SlotTime, project_events};
pub use dates::{day_offset, project_to_date, resolve_week_date};
pub use grid::{Cell, CellGrid, Row, load_grid_json};
pub use item::{CalendarEvent, EventKind, EventReport, ReportSummary, TimetableEntry};
pub use parser::{TimetableParser, parse_timetable};
