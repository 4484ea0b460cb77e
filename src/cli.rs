// File: ./src/cli.rs
//! Command-line argument handling and help text.
use anyhow::{Result, anyhow};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub grid_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub year: Option<i32>,
    pub raw: bool,
    pub max_rows: Option<usize>,
    pub list: bool,
    pub root: Option<PathBuf>,
    pub verbosity: u8,
    pub help: bool,
    pub version: bool,
}

impl CliArgs {
    /// Parses arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            let mut value_for = |flag: &str| {
                iter.next()
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "-h" | "--help" | "help" => out.help = true,
                "-V" | "--version" => out.version = true,
                "--raw" => out.raw = true,
                "--list" => out.list = true,
                "-v" | "--verbose" => out.verbosity = out.verbosity.saturating_add(1),
                "-vv" => out.verbosity = out.verbosity.saturating_add(2),
                "-o" | "--output" => out.output = Some(PathBuf::from(value_for(arg.as_str())?)),
                "-r" | "--root" => out.root = Some(PathBuf::from(value_for(arg.as_str())?)),
                "-y" | "--year" => {
                    let v = value_for(arg.as_str())?;
                    out.year = Some(
                        v.parse()
                            .map_err(|_| anyhow!("Invalid year '{}'", v))?,
                    );
                }
                "--max-rows" => {
                    let v = value_for(arg.as_str())?;
                    out.max_rows = Some(
                        v.parse()
                            .map_err(|_| anyhow!("Invalid row count '{}'", v))?,
                    );
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(anyhow!("Unknown option '{}'", flag));
                }
                _ => {
                    if out.grid_file.is_some() {
                        return Err(anyhow!("Unexpected argument '{}'", arg));
                    }
                    out.grid_file = Some(PathBuf::from(&arg));
                }
            }
        }
        Ok(out)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Timetab v{} - Extract a course timetable from a PDF table grid",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} <grid.json> [OPTIONS]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("INPUT:");
    println!("    <grid.json> is the table extracted from the PDF page, as a JSON array of");
    println!("    rows, each an array of strings or nulls. Use '-' to read it from stdin.");
    println!();
    println!("OPTIONS:");
    println!("    -o, --output <file>   Write entries (.csv, .json) or events (.ics, .ical).");
    println!("                          Without it, the event report is printed as JSON.");
    println!("    -y, --year <year>     Reference year for week dates (default: config, 2025).");
    println!("    --raw                 Show the raw table without parsing.");
    println!("    --max-rows <n>        Rows to show with --raw.");
    println!("    --list                Print the parsed entries grouped by day.");
    println!("    -r, --root <path>     Use a different directory for the config file.");
    println!("    -v, --verbose         More logging on stderr (repeat for more).");
    println!("    -V, --version         Show version.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} table.json", binary_name);
    println!("    {} table.json --output timetable.csv", binary_name);
    println!("    {} table.json --output timetable.ics --year 2025", binary_name);
    println!("    {} table.json --raw --max-rows 20", binary_name);
    println!();
    println!("TABLE LAYOUT:");
    println!("    Lundi 15/9 29/9 ...   Day header, one date per week column");
    println!("    matin / après-midi    Time slot rows (morning / afternoon also work)");
    println!("    course, PROFESSOR     Stacked lines per week, 'Examen' marks an exam");
}
