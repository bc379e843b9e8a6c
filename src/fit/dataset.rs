//! Per-date, per-filter datasets.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{InstrumentFilter, QuoteRecord, QuoteTable};
use crate::error::CurveError;

/// Quotes of one filter on one base date, unique by maturity and sorted.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub filter: InstrumentFilter,
    pub base_date: NaiveDate,
    pub records: Vec<QuoteRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Select the rows matching `filter` on `base_date`.
///
/// Duplicate maturities keep their first row in table order; the result is
/// sorted by maturity ascending.
pub fn build_dataset(
    table: &QuoteTable,
    base_date: NaiveDate,
    filter: InstrumentFilter,
) -> Result<Dataset, CurveError> {
    let mut seen = HashSet::new();
    let mut records: Vec<QuoteRecord> = table
        .records()
        .iter()
        .filter(|r| r.base_date == base_date && filter.matches(r.class))
        .filter(|r| seen.insert(r.maturity_date))
        .cloned()
        .collect();

    if records.is_empty() {
        return Err(CurveError::EmptyDataset {
            filter,
            base_date: Some(base_date),
        });
    }

    records.sort_by_key(|r| r.maturity_date);

    Ok(Dataset {
        filter,
        base_date,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawQuote;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw(title: &str, maturity: NaiveDate, base: NaiveDate, rate: f64) -> RawQuote {
        RawQuote {
            title: title.to_string(),
            maturity_date: maturity,
            base_date: base,
            buy_rate: rate,
            sell_rate: rate,
        }
    }

    fn table() -> QuoteTable {
        let b1 = ymd(2024, 1, 2);
        let b2 = ymd(2024, 1, 3);
        QuoteTable::from_raw(vec![
            raw("Tesouro Prefixado", ymd(2029, 1, 1), b1, 10.9),
            raw("Tesouro Prefixado com Juros Semestrais", ymd(2027, 1, 1), b1, 10.5),
            raw("Tesouro Prefixado", ymd(2026, 1, 1), b1, 10.2),
            // Same maturity again: first occurrence wins.
            raw("Tesouro Prefixado", ymd(2027, 1, 1), b1, 99.0),
            raw("Tesouro IPCA+", ymd(2029, 5, 15), b1, 5.8),
            raw("Tesouro Selic", ymd(2028, 3, 1), b1, 0.1),
            raw("Tesouro Prefixado", ymd(2029, 1, 1), b2, 11.0),
        ])
    }

    #[test]
    fn filters_dedups_and_sorts() {
        let ds = build_dataset(&table(), ymd(2024, 1, 2), InstrumentFilter::Nominal).unwrap();
        let maturities: Vec<_> = ds.records.iter().map(|r| r.maturity_date).collect();
        assert_eq!(maturities, vec![ymd(2026, 1, 1), ymd(2027, 1, 1), ymd(2029, 1, 1)]);
        assert!(maturities.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ds.records[1].code, "NTN-F 2027");
        assert_eq!(ds.records[1].indicative_rate, 10.5);
    }

    #[test]
    fn real_filter_and_other_dates() {
        let ds = build_dataset(&table(), ymd(2024, 1, 2), InstrumentFilter::Real).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].code, "NTN-B Principal 2029");

        let ds = build_dataset(&table(), ymd(2024, 1, 3), InstrumentFilter::Nominal).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn empty_match_is_reported() {
        let err = build_dataset(&table(), ymd(2024, 1, 3), InstrumentFilter::Real).unwrap_err();
        assert_eq!(
            err,
            CurveError::EmptyDataset {
                filter: InstrumentFilter::Real,
                base_date: Some(ymd(2024, 1, 3)),
            }
        );
    }
}
