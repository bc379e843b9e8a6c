//! Tesouro CSV ingest and normalization.
//!
//! This module turns the published `PrecoTaxaTesouroDireto.csv` into
//! locale-normalized `RawQuote` rows:
//!
//! - `;`-separated, Latin-1 encoded
//! - decimal commas (`10,23`)
//! - `dd/mm/yyyy` dates
//!
//! Row-level problems never abort the load: the row is skipped and reported.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ByteRecord;

use crate::domain::RawQuote;
use crate::error::AppError;

const COL_TITLE: &str = "tipo titulo";
const COL_MATURITY: &str = "data vencimento";
const COL_BASE: &str = "data base";
const COL_BUY: &str = "taxa compra manha";
const COL_SELL: &str = "taxa venda manha";

const REQUIRED: [&str; 5] = [COL_TITLE, COL_MATURITY, COL_BASE, COL_BUY, COL_SELL];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: normalized rows + row errors.
#[derive(Debug, Clone)]
pub struct IngestedQuotes {
    pub rows: Vec<RawQuote>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load and normalize the quote file at `path`.
pub fn load_quotes(path: &Path) -> Result<IngestedQuotes, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = read_quotes(file)?;

    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows.len(),
        row_errors = ingested.row_errors.len(),
        "quote file parsed"
    );
    for err in ingested.row_errors.iter().take(5) {
        tracing::debug!(line = err.line, "{}", err.message);
    }

    Ok(ingested)
}

/// Parse quotes from any reader.
pub fn read_quotes<R: Read>(reader: R) -> Result<IngestedQuotes, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .byte_headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in REQUIRED {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }

    let mut rows = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.byte_records().enumerate() {
        // +2: header line, then 1-based numbering.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if rows.is_empty() {
        return Err(AppError::new(3, "No valid quote rows in the CSV."));
    }

    Ok(IngestedQuotes {
        rows,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &ByteRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(&decode_latin1(name)), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // A UTF-8 BOM read through the Latin-1 decoder shows up as three chars.
    let name = name.trim_start_matches("\u{ef}\u{bb}\u{bf}");
    let name = name.trim().trim_start_matches('\u{feff}');
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn parse_row(record: &ByteRecord, header_map: &HashMap<String, usize>) -> Result<RawQuote, String> {
    let title = get_required(record, header_map, COL_TITLE)?;
    let maturity_date = parse_date(&get_required(record, header_map, COL_MATURITY)?)?;
    let base_date = parse_date(&get_required(record, header_map, COL_BASE)?)?;
    let buy_rate = parse_decimal(&get_required(record, header_map, COL_BUY)?)?;
    let sell_rate = parse_decimal(&get_required(record, header_map, COL_SELL)?)?;

    Ok(RawQuote {
        title,
        maturity_date,
        base_date,
        buy_rate,
        sell_rate,
    })
}

fn get_required(
    record: &ByteRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<String, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(decode_latin1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .map_err(|_| format!("Invalid date '{s}'. Expected DD/MM/YYYY."))
}

/// Parse a decimal-comma number (`"1.234,56"` style thousands are not used).
fn parse_decimal(s: &str) -> Result<f64, String> {
    let v = s
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("Invalid number '{s}'."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite number '{s}'."))
    }
}
