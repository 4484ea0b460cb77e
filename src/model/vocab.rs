// File: ./src/model/vocab.rs
//! Bilingual (French / English) words the timetable parser recognizes.
//!
//! Built once per process and shared; the parser and the date resolver borrow
//! the same instance instead of recreating the lists on every call.
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Day names in the order they are tested, paired with their offset from Monday.
const DAY_NAMES: &[(&str, u32)] = &[
    ("Lundi", 0),
    ("Mardi", 1),
    ("Mercredi", 2),
    ("Jeudi", 3),
    ("Vendredi", 4),
    ("Samedi", 5),
    ("Dimanche", 6),
    ("Monday", 0),
    ("Tuesday", 1),
    ("Wednesday", 2),
    ("Thursday", 3),
    ("Friday", 4),
    ("Saturday", 5),
    ("Sunday", 6),
];

const TIME_SLOT_TOKENS: &[&str] = &["matin", "après-midi", "morning", "afternoon"];

pub const MORNING_LABEL: &str = "Morning (8:30-12:15)";
pub const AFTERNOON_LABEL: &str = "Afternoon (13:30-17:15)";

#[derive(Debug, Clone)]
pub struct Vocabulary {
    days: Vec<(String, String, u32)>,
    time_slots: Vec<String>,
}

pub static DEFAULT_VOCABULARY: Lazy<Vocabulary> = Lazy::new(Vocabulary::new);

pub static DEFAULT_TIME_SLOT_LABELS: Lazy<HashMap<String, String>> =
    Lazy::new(default_time_slot_labels);

/// Human readable labels for the four recognized time-slot tokens.
pub fn default_time_slot_labels() -> HashMap<String, String> {
    HashMap::from([
        ("matin".to_string(), MORNING_LABEL.to_string()),
        ("après-midi".to_string(), AFTERNOON_LABEL.to_string()),
        ("morning".to_string(), MORNING_LABEL.to_string()),
        ("afternoon".to_string(), AFTERNOON_LABEL.to_string()),
    ])
}

impl Vocabulary {
    fn new() -> Self {
        Self {
            days: DAY_NAMES
                .iter()
                .map(|(name, offset)| (name.to_string(), name.to_lowercase(), *offset))
                .collect(),
            time_slots: TIME_SLOT_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Canonical day name that `text` starts with, ignoring case.
    /// Trailing content such as dates on the same cell is allowed.
    pub fn match_day(&self, text: &str) -> Option<&str> {
        let lower = text.trim().to_lowercase();
        self.days
            .iter()
            .find(|(_, lowered, _)| lower.starts_with(lowered.as_str()))
            .map(|(name, _, _)| name.as_str())
    }

    pub fn is_day_header(&self, text: &str) -> bool {
        self.match_day(text).is_some()
    }

    /// Exact (trimmed, case-insensitive) match against the time-slot tokens.
    pub fn is_time_slot(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.time_slots.iter().any(|t| *t == lower)
    }

    /// Offset from Monday of an exact day name. Unknown names map to Monday.
    pub fn day_offset(&self, day_name: &str) -> u32 {
        let lower = day_name.trim().to_lowercase();
        self.days
            .iter()
            .find(|(_, lowered, _)| *lowered == lower)
            .map(|(_, _, offset)| *offset)
            .unwrap_or(0)
    }
}
