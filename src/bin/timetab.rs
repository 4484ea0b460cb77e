use anyhow::Result;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::env;
use timetab::cli::{CliArgs, print_help};
use timetab::context::StandardContext;
use timetab::controller::TimetableController;

fn main() -> Result<()> {
    let args = CliArgs::parse(env::args().skip(1))?;

    if args.help {
        print_help("timetab");
        return Ok(());
    }
    if args.version {
        println!("timetab {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Logs go to stderr so stdout stays clean for the JSON report.
    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Off)
        .set_time_level(log::LevelFilter::Off)
        .build();
    let _ = TermLogger::init(
        args.log_level(),
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(args.root.clone());
    let mut controller = TimetableController::from_context(&ctx)?;
    if let Some(year) = args.year {
        controller.config.reference_year = year;
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    controller.run(&args, &mut handle)
}
