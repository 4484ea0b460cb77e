// File: ./src/export.rs
//! Serializers for parsed entries and projected events.
use crate::config::Config;
use crate::model::item::{CalendarEvent, EventReport, TimetableEntry};
use anyhow::{Context, Result};
use std::path::Path;

pub const ICS_PRODID: &str = "-//Timetab//Timetable Extractor//EN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum OutputFormat {
    #[strum(serialize = "CSV")]
    Csv,
    #[strum(serialize = "JSON")]
    Json,
    #[strum(serialize = "ICS")]
    Ics,
}

impl OutputFormat {
    /// `.json` -> JSON, `.ics`/`.ical` -> ICS, anything else -> CSV.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Self::Json,
            "ics" | "ical" => Self::Ics,
            _ => Self::Csv,
        }
    }
}

pub fn entries_to_csv(entries: &[TimetableEntry]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if entries.is_empty() {
        writer.write_record(["day", "time_slot", "week", "course", "professor"])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn entries_to_json(entries: &[TimetableEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// The `{events, summary}` document.
pub fn events_to_report_json(events: &[CalendarEvent]) -> Result<String> {
    let report = EventReport::new(events.to_vec());
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Generates a single VCALENDAR containing all events as VEVENT components.
pub fn events_to_ics(events: &[CalendarEvent], config: &Config) -> String {
    let mut output = String::from("BEGIN:VCALENDAR\r\n");
    output.push_str("VERSION:2.0\r\n");
    output.push_str(&format!("PRODID:{}\r\n", ICS_PRODID));
    output.push_str("CALSCALE:GREGORIAN\r\n");
    output.push_str("METHOD:PUBLISH\r\n");
    output.push_str(&format!("X-WR-CALNAME:{}\r\n", config.calendar_name));
    output.push_str(&format!("X-WR-TIMEZONE:{}\r\n", config.timezone));

    let location = config.location.as_deref().filter(|l| !l.is_empty());
    for event in events {
        let full_ics = event.to_ics(location);
        // "END:VEVENT" is 10 chars long
        if let Some(start) = full_ics.find("BEGIN:VEVENT")
            && let Some(end_idx) = full_ics.rfind("END:VEVENT")
        {
            output.push_str(&full_ics[start..end_idx + 10]);
            output.push_str("\r\n");
        }
    }

    output.push_str("END:VCALENDAR\r\n");
    output
}
