//! Maturity → year-fraction conversion.

use chrono::NaiveDate;

use crate::domain::{CurveConfig, CurvePoint, DayCount};
use crate::fit::dataset::Dataset;

/// Signed time from `base` to `maturity` in years.
pub fn year_fraction(base: NaiveDate, maturity: NaiveDate, day_count: DayCount) -> f64 {
    (maturity - base).num_days() as f64 / day_count.year_denominator()
}

/// Knots of a dataset, measured from its own base date.
///
/// Instruments that matured more than `stale_tolerance` years ago are
/// dropped; recently matured ones are kept.
pub fn curve_points(dataset: &Dataset, config: &CurveConfig) -> Vec<CurvePoint> {
    dataset
        .records
        .iter()
        .map(|r| CurvePoint {
            year_fraction: year_fraction(dataset.base_date, r.maturity_date, config.day_count),
            rate: r.indicative_rate,
        })
        .filter(|p| p.year_fraction >= -config.stale_tolerance)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstrumentClass, InstrumentFilter, QuoteRecord};
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_fraction_basic() {
        let base = ymd(2024, 1, 2);
        assert_eq!(year_fraction(base, base, DayCount::Act365_25), 0.0);
        let t = year_fraction(base, base + chrono::Days::new(182), DayCount::Act365_25);
        assert_relative_eq!(t, 182.0 / 365.25, epsilon = 1e-12);
        assert!((t - 0.4983).abs() < 1e-4);
    }

    #[test]
    fn retention_keeps_recent_drops_stale() {
        let base = ymd(2024, 7, 1);
        let record = |maturity| QuoteRecord {
            class: InstrumentClass::NominalZero,
            code: "LTN".to_string(),
            maturity_date: maturity,
            base_date: base,
            buy_rate: 10.0,
            sell_rate: 10.0,
            indicative_rate: 10.0,
        };
        // -219 days ≈ -0.5996y, -146 days ≈ -0.3997y
        let stale = base - chrono::Days::new(219);
        let recent = base - chrono::Days::new(146);
        let ds = Dataset {
            filter: InstrumentFilter::Nominal,
            base_date: base,
            records: vec![record(stale), record(recent), record(ymd(2026, 1, 1))],
        };

        let points = curve_points(&ds, &CurveConfig::default());
        assert_eq!(points.len(), 2);
        assert_relative_eq!(points[0].year_fraction, -146.0 / 365.25, epsilon = 1e-12);
        assert!(points[1].year_fraction > 1.0);
    }
}
