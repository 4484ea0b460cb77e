// File: ./src/model/item.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Marker appended to a course name when the cell announces an exam.
pub const EXAM_MARKER: &str = "[EXAMEN]";

/// One (day, time slot, week) cell of the timetable.
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub day: String,
    pub time_slot: String,
    pub week: String,
    pub course: String,
    pub professor: String,
}

impl TimetableEntry {
    pub fn is_exam(&self) -> bool {
        self.course.contains(EXAM_MARKER)
    }

    /// Course name without the exam marker.
    pub fn display_title(&self) -> String {
        self.course.replace(EXAM_MARKER, "").trim().to_string()
    }
}

impl fmt::Display for TimetableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (Week {}): {} - {}",
            self.day, self.time_slot, self.week, self.course, self.professor
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Course,
    Exam,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub teacher: Option<String>,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "start_time")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_time")]
    pub end: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub color: Option<String>,

    // Kept for calendar exports, not part of the event report.
    #[serde(skip)]
    pub time_slot: String,
    #[serde(skip)]
    pub week: String,
    #[serde(skip)]
    pub categories: Vec<String>,
}

impl CalendarEvent {
    pub fn is_exam(&self) -> bool {
        self.kind == EventKind::Exam
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub courses: usize,
    pub exams: usize,
}

/// The JSON document printed when no output file is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventReport {
    pub events: Vec<CalendarEvent>,
    pub summary: ReportSummary,
}

impl EventReport {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        let exams = events.iter().filter(|e| e.is_exam()).count();
        let summary = ReportSummary {
            total: events.len(),
            courses: events.len() - exams,
            exams,
        };
        Self { events, summary }
    }
}
