//! Reporting: the per-maturity rate table and terminal formatting.

pub mod format;

pub use format::*;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::fit::CurveSlot;

/// Quoted rates keyed by maturity, one column per dataset.
///
/// Only successful slots contribute. A breakeven slot contributes two
/// columns (`"<label> nominal"`, `"<label> real"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    pub columns: Vec<String>,
    /// `rows[maturity][column]`; `None` where that dataset has no such maturity.
    pub rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

impl RateTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Union of maturities across all successful slots, in request order.
pub fn build_rate_table(slots: &[CurveSlot]) -> RateTable {
    let datasets: Vec<_> = slots
        .iter()
        .filter_map(|s| s.outcome.as_ref().ok())
        .flat_map(|out| out.datasets.iter())
        .collect();

    let width = datasets.len();
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (col, (_, dataset)) in datasets.iter().enumerate() {
        for record in &dataset.records {
            let row = rows
                .entry(record.maturity_date)
                .or_insert_with(|| vec![None; width]);
            row[col] = Some(record.indicative_rate);
        }
    }

    RateTable {
        columns: datasets.iter().map(|(label, _)| label.clone()).collect(),
        rows,
    }
}
