//! The immutable, canonicalized quote table.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::domain::instrument::canonicalize;
use crate::domain::{InstrumentClass, QuoteRecord, RawQuote, indicative_rate};

/// All quote rows of a session, in source order.
///
/// Built once from the ingest output and only read afterwards; the curve
/// pipeline borrows it from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct QuoteTable {
    records: Vec<QuoteRecord>,
    base_dates: BTreeSet<NaiveDate>,
    unknown_titles: usize,
}

impl QuoteTable {
    /// Canonicalize raw rows into a table.
    ///
    /// Unrecognized titles are kept (for display) and reported once each.
    pub fn from_raw(rows: Vec<RawQuote>) -> Self {
        let mut unknown_titles: HashSet<String> = HashSet::new();
        let mut base_dates = BTreeSet::new();

        let records: Vec<QuoteRecord> = rows
            .into_iter()
            .map(|row| {
                let (class, code) = canonicalize(&row.title, row.maturity_date);
                if class == InstrumentClass::Unknown && unknown_titles.insert(code.clone()) {
                    tracing::warn!(title = %code, "unrecognized instrument title; excluded from curves");
                }
                base_dates.insert(row.base_date);
                QuoteRecord {
                    class,
                    code,
                    maturity_date: row.maturity_date,
                    base_date: row.base_date,
                    buy_rate: row.buy_rate,
                    sell_rate: row.sell_rate,
                    indicative_rate: indicative_rate(row.buy_rate, row.sell_rate),
                }
            })
            .collect();

        tracing::debug!(
            rows = records.len(),
            base_dates = base_dates.len(),
            unknown_titles = unknown_titles.len(),
            "quote table built"
        );

        Self {
            records,
            base_dates,
            unknown_titles: unknown_titles.len(),
        }
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    /// Distinct base dates, ascending.
    pub fn base_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.base_dates
    }

    /// Distinct unrecognized titles (each was warned about once).
    pub fn unknown_titles(&self) -> usize {
        self.unknown_titles
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
