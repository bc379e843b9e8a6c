//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - reads the clock (the only place that does)
//! - runs the curve pipeline
//! - prints reports/plots
//! - writes optional exports

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, CurveArgs, DatesArgs, MAX_DATES, SourceArgs};
use crate::domain::{CurveConfig, CurveRequest, DateSpec, SourceConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tc` binary.
pub fn run() -> Result<(), AppError> {
    // `tc` and `tc -k real ...` behave like `tc curves ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(cli.verbose, cli.quiet);

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Curves(args) => handle_curves(args, today, OutputMode::Full),
        Command::Table(args) => handle_curves(args, today, OutputMode::TableOnly),
        Command::Dates(args) => handle_dates(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TableOnly,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    // A second init (e.g. from tests) is harmless; ignore it.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_curves(args: CurveArgs, today: NaiveDate, mode: OutputMode) -> Result<(), AppError> {
    let requests = requests_from_args(&args)?;
    let config = curve_config_from_args(&args)?;
    let source = source_config_from_args(&args.source);

    let run = pipeline::run_curves(&source, &requests, today, &config)?;

    if mode == OutputMode::Full {
        println!(
            "{}",
            crate::report::format_run_summary(&run.quotes.table, args.kind, &run.slots)
        );
        if !args.no_plot {
            println!(
                "{}",
                crate::plot::render_curves_plot(&run.slots, args.width, args.height)
            );
        }
    }
    if mode == OutputMode::TableOnly || args.table {
        println!("{}", crate::report::format_rate_table(&run.rate_table));
    }

    // Optional exports.
    if let Some(path) = &args.export_json {
        crate::io::curve::write_curves_json(path, &run.slots, today, &config)?;
    }
    if let Some(path) = &args.export_table {
        crate::io::export::write_rate_table_csv(path, &run.rate_table)?;
    }

    if run.slots.iter().all(|s| s.outcome.is_err()) {
        return Err(AppError::new(3, "No curve could be built for the requested dates."));
    }
    Ok(())
}

fn handle_dates(args: DatesArgs) -> Result<(), AppError> {
    let source = source_config_from_args(&args.source);
    let quotes = pipeline::load_quote_table(&source)?;

    let all = quotes.table.base_dates();
    let recent: Vec<NaiveDate> = all.iter().rev().take(args.limit).copied().collect();
    print!("{}", crate::report::format_dates(&recent, all.len()));
    Ok(())
}

pub fn requests_from_args(args: &CurveArgs) -> Result<Vec<CurveRequest>, AppError> {
    if args.dates.len() > MAX_DATES {
        return Err(AppError::new(
            2,
            format!("At most {MAX_DATES} reference dates per run (got {}).", args.dates.len()),
        ));
    }
    Ok(args
        .dates
        .iter()
        .map(|d| CurveRequest {
            kind: args.kind,
            date: DateSpec::parse(d),
        })
        .collect())
}

pub fn curve_config_from_args(args: &CurveArgs) -> Result<CurveConfig, AppError> {
    if args.samples < 2 {
        return Err(AppError::new(2, "--samples must be at least 2."));
    }
    if !(args.horizon.is_finite() && args.horizon > 0.0) {
        return Err(AppError::new(2, "--horizon must be a positive number of years."));
    }
    Ok(CurveConfig {
        grid_samples: args.samples,
        breakeven_horizon: args.horizon,
        day_count: args.day_count,
        ..CurveConfig::default()
    })
}

fn source_config_from_args(args: &SourceArgs) -> SourceConfig {
    SourceConfig::from_env(args.url.clone(), args.csv.clone(), args.offline)
}

/// Rewrite argv so `tc` defaults to `tc curves`.
///
/// Rules:
/// - `tc`                      -> `tc curves`
/// - `tc -k real ...`          -> `tc curves -k real ...`
/// - `tc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("curves".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // Global flags may precede the subcommand (`tc -v dates`).
    let has_subcommand = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "curves" | "table" | "dates"));
    if has_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "curves flags".
    if arg1.starts_with('-') {
        argv.insert(1, "curves".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
