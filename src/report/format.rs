//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the curve code stays clean and testable
//! - output changes are localized

use chrono::NaiveDate;

use crate::domain::{CurveKind, QuoteTable};
use crate::fit::CurveSlot;
use crate::report::RateTable;

const DATE_FMT: &str = "%d/%m/%Y";

/// Format the run summary: table stats plus one line per curve slot.
pub fn format_run_summary(table: &QuoteTable, kind: CurveKind, slots: &[CurveSlot]) -> String {
    let mut out = String::new();

    out.push_str("=== tc - Tesouro Direto curves ===\n");
    out.push_str(&format!("Curve: {}\n", kind.display_name()));
    let dates = table.base_dates();
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Quotes: n={} | base dates={} [{} .. {}]\n",
            table.len(),
            dates.len(),
            first.format(DATE_FMT),
            last.format(DATE_FMT),
        )),
        _ => out.push_str("Quotes: n=0\n"),
    }

    out.push_str("\nCurves:\n");
    for slot in slots {
        match &slot.outcome {
            Ok(o) => {
                let knots = &o.curve.knots;
                let (lo, hi) = rate_range(knots.iter().map(|k| k.rate));
                out.push_str(&format!(
                    "[{}] {:<12} base={} knots={:<3} x=[{:.2}, {:.2}]y rate=[{:.2}, {:.2}]%\n",
                    slot.index + 1,
                    truncate(&slot.label, 12),
                    o.base_date.format(DATE_FMT),
                    knots.len(),
                    o.curve.x_min,
                    o.curve.x_max,
                    lo,
                    hi,
                ));
            }
            Err(err) => out.push_str(&format!(
                "[{}] {:<12} unavailable: {err}\n",
                slot.index + 1,
                truncate(&slot.label, 12),
            )),
        }
    }
    out.push('\n');

    out
}

/// Format the rate table: one row per maturity, `-` for gaps.
pub fn format_rate_table(rt: &RateTable) -> String {
    if rt.is_empty() {
        return "No quotes for the requested curves.\n".to_string();
    }

    let widths: Vec<usize> = rt.columns.iter().map(|c| c.chars().count().max(8)).collect();

    let mut out = String::new();
    let mut header = format!("{:<10}", "maturity");
    let mut rule = format!("{:-<10}", "");
    for (col, w) in rt.columns.iter().zip(&widths) {
        header.push_str(&format!(" {col:>w$}"));
        rule.push_str(&format!(" {:->w$}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (maturity, values) in &rt.rows {
        let mut line = maturity.format(DATE_FMT).to_string();
        for (v, w) in values.iter().zip(&widths) {
            match v {
                Some(v) => line.push_str(&format!(" {v:>w$.2}")),
                None => line.push_str(&format!(" {:>w$}", "-")),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format a newest-first slice of base dates out of `total` available.
pub fn format_dates(dates: &[NaiveDate], total: usize) -> String {
    let mut out = format!("Base dates: {total} available");
    if let Some(last) = dates.first() {
        out.push_str(&format!(", latest {}", last.format(DATE_FMT)));
    }
    out.push('\n');
    for d in dates {
        out.push_str(&format!("  {}\n", d.format(DATE_FMT)));
    }
    out
}

fn rate_range(rates: impl Iterator<Item = f64>) -> (f64, f64) {
    rates.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(r), hi.max(r)))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
