//! Command-line parsing for the Tesouro Direto curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the curve/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CurveKind, DayCount};

/// Maximum number of reference dates per run.
pub const MAX_DATES: usize = 5;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tc", version, about = "Tesouro Direto yield curves (nominal, real, breakeven)")]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit curves for up to five reference dates; print a summary and plot.
    Curves(CurveArgs),
    /// Print only the per-maturity rate table behind the requested curves.
    Table(CurveArgs),
    /// List the most recent base dates in the quote file.
    Dates(DatesArgs),
}

/// Where to read quotes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Local quote file (download target and offline fallback).
    /// Defaults to `$TESOURO_CSV_PATH`, then `PrecoTaxaTesouroDireto.csv`.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Download URL. Defaults to `$TESOURO_CSV_URL`, then Tesouro Transparente.
    #[arg(long)]
    pub url: Option<String>,

    /// Skip the download and use the local file as-is.
    #[arg(long)]
    pub offline: bool,
}

/// Options shared by `curves` and `table`.
#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Curve type.
    #[arg(short = 'k', long, value_enum, default_value_t = CurveKind::Nominal)]
    pub kind: CurveKind,

    /// Reference dates: `today` (or `hoje`, `0d`), `<n>w`, `<n>m`, `<n>y` or `dd/mm/yyyy`
    /// (repeatable, max 5).
    #[arg(short = 'd', long = "date", value_name = "SPEC", default_values_t = ["today".to_string()])]
    pub dates: Vec<String>,

    /// Samples per fitted curve.
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Horizon (years) for breakeven curves and their inputs.
    #[arg(long, default_value_t = 10.0)]
    pub horizon: f64,

    /// Day-count convention for year fractions.
    #[arg(long, value_enum, default_value_t = DayCount::Act365_25)]
    pub day_count: DayCount,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Also print the per-maturity rate table.
    #[arg(long)]
    pub table: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export fitted curves (samples + knots) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export the rate table to CSV.
    #[arg(long = "export-table", value_name = "CSV")]
    pub export_table: Option<PathBuf>,
}

/// Options for listing base dates.
#[derive(Debug, Args, Clone)]
pub struct DatesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// How many of the most recent dates to show.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_defaults() {
        let cli = Cli::parse_from(["tc", "curves"]);
        let Command::Curves(args) = cli.command else {
            panic!("expected curves");
        };
        assert_eq!(args.kind, CurveKind::Nominal);
        assert_eq!(args.dates, vec!["today"]);
        assert_eq!(args.samples, 500);
        assert_eq!(args.horizon, 10.0);
        assert!(!args.source.offline);
    }

    #[test]
    fn repeated_dates_and_aliases() {
        let cli = Cli::parse_from([
            "tc", "table", "-k", "ipca", "-d", "today", "-d", "1m", "--offline", "--csv", "q.csv",
        ]);
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.kind, CurveKind::Real);
        assert_eq!(args.dates, vec!["today", "1m"]);
        assert_eq!(args.source.csv, Some(PathBuf::from("q.csv")));
        assert!(args.source.offline);
    }

    #[test]
    fn kebab_case_kinds() {
        let cli = Cli::parse_from(["tc", "-vv", "curves", "-k", "ntn-b-principal"]);
        assert_eq!(cli.verbose, 2);
        let Command::Curves(args) = cli.command else {
            panic!("expected curves");
        };
        assert_eq!(args.kind, CurveKind::NtnBPrincipal);
    }
}
