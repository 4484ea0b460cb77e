// File: src/model/adapter.rs
// Timetable entries -> calendar events, and calendar events -> iCalendar.
use crate::model::dates::project_to_date_at;
use crate::model::item::{CalendarEvent, EventKind, TimetableEntry};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime, Utc};
use icalendar::{Calendar, Component, Event};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ICS_DATETIME: &str = "%Y%m%dT%H%M%S";

/// A clock range for one time slot, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTime {
    pub key: String,
    pub start: String, // Format "HH:MM"
    pub end: String,
}

impl SlotTime {
    pub fn new(key: &str, start: &str, end: &str) -> Self {
        Self {
            key: key.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

pub fn default_slot_times() -> Vec<SlotTime> {
    vec![
        SlotTime::new("morning", "08:30", "12:15"),
        SlotTime::new("afternoon", "13:30", "17:15"),
    ]
}

#[derive(Debug, Clone)]
struct SlotClock {
    needle: String,
    start: NaiveTime,
    end: NaiveTime,
}

fn parse_clock(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid clock time '{}', expected HH:MM", s))
}

fn build_slots(slots: &[SlotTime]) -> Result<Vec<SlotClock>> {
    slots
        .iter()
        .map(|s| {
            let needle = s
                .key
                .split('(')
                .next()
                .unwrap_or_default()
                .trim()
                .to_lowercase();
            Ok(SlotClock {
                needle,
                start: parse_clock(&s.start)?,
                end: parse_clock(&s.end)?,
            })
        })
        .collect()
}

fn morning_fallback() -> (NaiveTime, NaiveTime) {
    (
        NaiveTime::from_hms_opt(8, 30, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(12, 15, 0).unwrap_or_default(),
    )
}

/// Builds calendar events from parsed entries for a given reference year.
#[derive(Debug, Clone)]
pub struct EventProjector {
    reference_year: i32,
    slots: Vec<SlotClock>,
    now: NaiveDateTime,
}

impl EventProjector {
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            slots: build_slots(&default_slot_times()).unwrap_or_default(),
            now: Local::now().naive_local(),
        }
    }

    /// Replaces the clock table. Keys are matched against the part before `(`.
    pub fn with_slots(mut self, slots: &[SlotTime]) -> Result<Self> {
        self.slots = build_slots(slots).context("Invalid time slot table")?;
        Ok(self)
    }

    /// Pins "now" used to decide which academic year a week label falls in.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Clock range of a time-slot label; unknown labels get the morning slot.
    pub fn clock_range(&self, time_slot: &str) -> (NaiveTime, NaiveTime) {
        let label = time_slot.to_lowercase();
        if let Some(slot) = self
            .slots
            .iter()
            .find(|s| !s.needle.is_empty() && label.contains(s.needle.as_str()))
        {
            return (slot.start, slot.end);
        }
        self.slots
            .iter()
            .find(|s| s.needle == "morning")
            .map(|s| (s.start, s.end))
            .unwrap_or_else(morning_fallback)
    }

    pub fn project_entry(&self, entry: &TimetableEntry) -> Option<CalendarEvent> {
        let date = project_to_date_at(&entry.week, &entry.day, self.reference_year, self.now)?;
        let (start, end) = self.clock_range(&entry.time_slot);

        let kind = if entry.is_exam() {
            EventKind::Exam
        } else {
            EventKind::Course
        };
        let title = entry.display_title();
        let teacher = (!entry.professor.is_empty()).then(|| entry.professor.clone());
        let description = match &teacher {
            Some(t) => format!("{} - {}", title, t),
            None => title.clone(),
        };

        let mut categories: Vec<String> = title
            .split_whitespace()
            .next()
            .map(|w| vec![w.to_string()])
            .unwrap_or_default();
        if kind == EventKind::Exam {
            categories.push("EXAM".to_string());
        }

        Some(CalendarEvent {
            title,
            teacher,
            description,
            location: None,
            start: date.and_time(start),
            end: date.and_time(end),
            kind,
            color: None,
            time_slot: entry.time_slot.clone(),
            week: entry.week.clone(),
            categories,
        })
    }

    /// Projects every entry; entries whose week label has no valid date are dropped.
    pub fn project(&self, entries: &[TimetableEntry]) -> Vec<CalendarEvent> {
        let mut events = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.project_entry(entry) {
                Some(ev) => events.push(ev),
                None => log::warn!(
                    "Skipping '{}' on {}: week '{}' is not a valid date",
                    entry.course,
                    entry.day,
                    entry.week
                ),
            }
        }
        events
    }
}

pub fn project_events(entries: &[TimetableEntry], reference_year: i32) -> Vec<CalendarEvent> {
    EventProjector::new(reference_year).project(entries)
}

impl CalendarEvent {
    pub fn ics_summary(&self) -> String {
        match self.kind {
            EventKind::Exam => format!("🎓 EXAM: {}", self.title),
            EventKind::Course => self.title.clone(),
        }
    }

    pub fn ics_description(&self) -> String {
        let mut parts = Vec::new();
        if let Some(t) = &self.teacher {
            parts.push(format!("teacher: {}", t));
        }
        parts.push(format!("Time: {}", self.time_slot));
        parts.push(format!("Week: {}", self.week));
        if self.is_exam() {
            parts.push("\n⚠️ EXAMINATION SESSION".to_string());
        }
        parts.join("\n")
    }

    /// Renders the event as a standalone VCALENDAR holding one VEVENT.
    pub fn to_ics(&self, location: Option<&str>) -> String {
        let mut event = Event::new();
        event.uid(&Uuid::new_v4().to_string());
        event.summary(&self.ics_summary());
        event.description(&self.ics_description());
        event.timestamp(Utc::now());

        // Floating local times, the timezone lives on the calendar.
        event.add_property("DTSTART", self.start.format(ICS_DATETIME).to_string());
        event.add_property("DTEND", self.end.format(ICS_DATETIME).to_string());

        if let Some(loc) = location.or(self.location.as_deref()) {
            event.add_property("LOCATION", loc);
        }

        let mut calendar = Calendar::new();
        calendar.push(event);
        let mut ics = calendar.to_string();

        // CATEGORIES is a list value; written by hand so commas stay separators.
        if !self.categories.is_empty() {
            let escaped: Vec<String> = self
                .categories
                .iter()
                .map(|c| c.replace(',', "\\,"))
                .collect();
            let cat_line = format!("CATEGORIES:{}", escaped.join(","));

            if let Some(idx) = ics.rfind("END:VEVENT") {
                let (start, end) = ics.split_at(idx);
                let mut buffer = String::with_capacity(ics.len() + cat_line.len() + 2);
                buffer.push_str(start);
                buffer.push_str(&cat_line);
                buffer.push_str("\r\n");
                buffer.push_str(end);
                ics = buffer;
            }
        }
        ics
    }
}
