// File: src/controller.rs
//! Ties the pieces together for the command line: load the grid, parse it,
//! project events and hand the result to the requested exporter.
use crate::cli::CliArgs;
use crate::config::Config;
use crate::context::AppContext;
use crate::export::{
    OutputFormat, entries_to_csv, entries_to_json, events_to_ics, events_to_report_json,
};
use crate::model::display::{format_entries, format_grid};
use crate::model::grid::{CellGrid, load_grid_json};
use crate::model::item::{CalendarEvent, TimetableEntry};
use crate::model::parser::TimetableParser;
use crate::model::vocab::DEFAULT_VOCABULARY;
use crate::storage::LocalStorage;
use anyhow::{Context, Result, anyhow};
use std::io::{Read, Write};
use std::path::Path;

/// Reads a grid document from a file, or stdin for `-`.
pub fn read_grid(path: &Path) -> Result<CellGrid> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read grid from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read grid file '{}'", path.display()))?
    };
    load_grid_json(&json).with_context(|| format!("Invalid grid in '{}'", path.display()))
}

pub struct TimetableController {
    pub config: Config,
}

impl TimetableController {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn from_context(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::new(Config::load_or_default(ctx)?))
    }

    pub fn parse(&self, grid: &[Vec<Option<String>>]) -> Vec<TimetableEntry> {
        TimetableParser::new(&DEFAULT_VOCABULARY, &self.config.time_slot_labels).parse(grid)
    }

    pub fn project(&self, entries: &[TimetableEntry]) -> Result<Vec<CalendarEvent>> {
        Ok(self.config.projector()?.project(entries))
    }

    /// Renders entries (CSV, JSON) or their events (ICS) in `format`.
    pub fn render(&self, entries: &[TimetableEntry], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => entries_to_csv(entries),
            OutputFormat::Json => entries_to_json(entries),
            OutputFormat::Ics => {
                let events = self.project(entries)?;
                Ok(events_to_ics(&events, &self.config))
            }
        }
    }

    /// Default output: the event report as JSON.
    pub fn report(&self, entries: &[TimetableEntry]) -> Result<String> {
        let events = self.project(entries)?;
        log::info!(
            "{} of {} entries projected to calendar events",
            events.len(),
            entries.len()
        );
        events_to_report_json(&events)
    }

    /// Runs one command line invocation, writing console output to `out`.
    pub fn run(&self, args: &CliArgs, out: &mut dyn Write) -> Result<()> {
        let grid_path = args
            .grid_file
            .as_deref()
            .ok_or_else(|| anyhow!("No grid file given (see --help)"))?;
        let grid = read_grid(grid_path)?;

        if grid.is_empty() {
            return Err(anyhow!("No table data in '{}'", grid_path.display()));
        }

        if args.raw {
            writeln!(out, "\n=== RAW TABLE ===\n")?;
            write!(out, "{}", format_grid(&grid, args.max_rows))?;
            return Ok(());
        }

        let entries = self.parse(&grid);
        log::info!("Extracted {} timetable entries", entries.len());

        if args.list {
            write!(out, "{}", format_entries(&entries))?;
        }

        if let Some(path) = &args.output {
            let format = OutputFormat::from_path(path);
            let contents = self.render(&entries, format)?;
            LocalStorage::write_output(path, &contents)?;
            log::info!("Timetable saved to {}: {}", format, path.display());
            return Ok(());
        }

        if !args.list {
            writeln!(out, "{}", self.report(&entries)?)?;
        }
        Ok(())
    }
}
