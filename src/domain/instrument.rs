//! Instrument-title canonicalization.
//!
//! The Tesouro file names bonds by their retail title ("Tesouro IPCA+ com
//! Juros Semestrais"). The curve engine works with market codes instead
//! (`NTN-B 2030`), so every row is classified once at load time.
//!
//! Classification is a lookup over normalized title fragments, checked in
//! order: coupon-paying variants must come before their zero-coupon
//! prefixes.

use chrono::{Datelike, NaiveDate};

use crate::domain::InstrumentClass;

const CLASSIFIER: &[(&str, InstrumentClass)] = &[
    ("ipca+ com juros semestrais", InstrumentClass::RealCoupon),
    ("ipca+ with semiannual coupon", InstrumentClass::RealCoupon),
    ("prefixado com juros semestrais", InstrumentClass::NominalCoupon),
    ("prefixed with semiannual coupon", InstrumentClass::NominalCoupon),
    ("ipca+", InstrumentClass::RealZero),
    ("prefixado", InstrumentClass::NominalZero),
    ("prefixed", InstrumentClass::NominalZero),
];

/// Classify a raw title.
pub fn classify_title(title: &str) -> InstrumentClass {
    let normalized = normalize_title(title);
    CLASSIFIER
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, class)| *class)
        .unwrap_or(InstrumentClass::Unknown)
}

/// Classify a title and build its display code (`<code> <maturity year>`).
///
/// Unknown titles keep their original text.
pub fn canonicalize(title: &str, maturity: NaiveDate) -> (InstrumentClass, String) {
    let class = classify_title(title);
    let code = match class.code() {
        Some(code) => format!("{code} {}", maturity.year()),
        None => title.trim().to_string(),
    };
    (class, code)
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
