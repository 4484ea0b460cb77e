// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::adapter::{EventProjector, SlotTime, default_slot_times};
use crate::model::vocab::default_time_slot_labels;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

fn default_reference_year() -> i32 {
    2025
}

fn default_calendar_name() -> String {
    "Course Timetable".to_string()
}

fn default_timezone() -> String {
    "Europe/Paris".to_string()
}

fn default_location() -> Option<String> {
    Some("Campus".to_string())
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,

    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_location")]
    pub location: Option<String>,

    /// Time-slot token -> label stored on entries. Tokens match ignoring case.
    #[serde(default = "default_time_slot_labels")]
    pub time_slot_labels: HashMap<String, String>,

    #[serde(default = "default_slot_times")]
    pub slot_times: Vec<SlotTime>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            calendar_name: default_calendar_name(),
            timezone: default_timezone(),
            location: default_location(),
            time_slot_labels: default_time_slot_labels(),
            slot_times: default_slot_times(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file gives the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether `err` means the config file does not exist, either our explicit
    /// message or an IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Event projector for this config's year and clock table.
    pub fn projector(&self) -> Result<EventProjector> {
        EventProjector::new(self.reference_year).with_slots(&self.slot_times)
    }
}
