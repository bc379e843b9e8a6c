//! Shared "curve pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! acquire -> ingest -> quote table -> curve slots -> rate table

use chrono::NaiveDate;

use crate::data::TesouroClient;
use crate::domain::{CurveConfig, CurveRequest, QuoteTable, SourceConfig};
use crate::error::AppError;
use crate::fit::{CurveSlot, compute_curves};
use crate::io::ingest::load_quotes;
use crate::report::{RateTable, build_rate_table};

/// Quote table plus ingest counters.
#[derive(Debug, Clone)]
pub struct LoadedQuotes {
    pub table: QuoteTable,
    pub rows_read: usize,
    pub row_errors: usize,
}

/// All computed outputs of a single `tc curves` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub quotes: LoadedQuotes,
    pub slots: Vec<CurveSlot>,
    pub rate_table: RateTable,
}

/// Fetch (or reuse) the quote file and build the canonical quote table.
pub fn load_quote_table(source: &SourceConfig) -> Result<LoadedQuotes, AppError> {
    let path = TesouroClient::new(source.clone())?.fetch()?;
    let ingested = load_quotes(&path)?;

    let table = QuoteTable::from_raw(ingested.rows);
    if table.is_empty() {
        return Err(AppError::new(3, "Quote file contains no usable rows."));
    }

    Ok(LoadedQuotes {
        table,
        rows_read: ingested.rows_read,
        row_errors: ingested.row_errors.len(),
    })
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_curves(
    source: &SourceConfig,
    requests: &[CurveRequest],
    today: NaiveDate,
    config: &CurveConfig,
) -> Result<RunOutput, AppError> {
    let quotes = load_quote_table(source)?;
    Ok(run_curves_with_table(quotes, requests, today, config))
}

/// Execute the pipeline on an already loaded table.
pub fn run_curves_with_table(
    quotes: LoadedQuotes,
    requests: &[CurveRequest],
    today: NaiveDate,
    config: &CurveConfig,
) -> RunOutput {
    let slots = compute_curves(&quotes.table, requests, today, config);
    let rate_table = build_rate_table(&slots);
    RunOutput {
        quotes,
        slots,
        rate_table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveKind, DateSpec};
    use std::fs;

    const CSV: &str = "Tipo Titulo;Data Vencimento;Data Base;Taxa Compra Manha;Taxa Venda Manha\n\
        Tesouro Prefixado;01/01/2025;02/01/2024;10,00;10,10\n\
        Tesouro Prefixado;01/01/2027;02/01/2024;10,50;10,60\n\
        Tesouro Prefixado com Juros Semestrais;01/01/2031;02/01/2024;11,00;11,10\n\
        Tesouro IPCA+;15/05/2029;02/01/2024;5,50;5,60\n\
        Tesouro IPCA+ com Juros Semestrais;15/08/2032;02/01/2024;5,80;5,90\n\
        Tesouro Selic;01/03/2029;02/01/2024;0,05;0,06\n\
        Tesouro Prefixado;01/01/2027;29/12/2023;;10,60\n";

    fn offline_source(dir: &tempfile::TempDir) -> SourceConfig {
        let path = dir.path().join("quotes.csv");
        fs::write(&path, CSV).unwrap();
        SourceConfig {
            url: String::new(),
            local_path: path,
            offline: true,
        }
    }

    #[test]
    fn offline_file_to_breakeven() {
        let dir = tempfile::tempdir().unwrap();
        let source = offline_source(&dir);
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let requests = vec![
            CurveRequest { kind: CurveKind::Breakeven, date: DateSpec::Today },
            CurveRequest { kind: CurveKind::Breakeven, date: DateSpec::YearsAgo(1) },
        ];

        let run = run_curves(&source, &requests, today, &CurveConfig::default()).unwrap();
        assert_eq!(run.quotes.rows_read, 7);
        assert_eq!(run.quotes.row_errors, 1);
        assert_eq!(run.quotes.table.len(), 6);

        assert_eq!(run.slots.len(), 2);
        let curve = run.slots[0].curve().unwrap();
        assert!(curve.x_max <= 10.0);
        // 1y ago snaps to the only (earliest) base date too.
        assert!(run.slots[1].curve().is_some());
        assert_eq!(
            run.rate_table.columns,
            vec!["today nominal", "today real", "1y ago nominal", "1y ago real"]
        );
        assert_eq!(run.rate_table.rows.len(), 5);
    }

    #[test]
    fn missing_file_offline_is_acquisition_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceConfig {
            url: String::new(),
            local_path: dir.path().join("nope.csv"),
            offline: true,
        };
        assert_eq!(load_quote_table(&source).unwrap_err().exit_code(), 4);
    }
}
