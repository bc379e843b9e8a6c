//! Reference-date resolution.
//!
//! A slot's `DateSpec` is turned into a calendar target relative to an
//! explicit `today`, then snapped to the closest base date present in the
//! quote table. Ties go to the earlier date.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};

use crate::domain::DateSpec;
use crate::error::CurveError;

const DAYS_PER_WEEK: u64 = 7;
const DAYS_PER_MONTH: u64 = 30;
const DAYS_PER_YEAR: u64 = 365;

/// Turn a date spec into a calendar date.
pub fn resolve_target(spec: &DateSpec, today: NaiveDate) -> Result<NaiveDate, CurveError> {
    let back = |n: u32, unit: u64| {
        today
            .checked_sub_days(Days::new(u64::from(n) * unit))
            .ok_or_else(|| CurveError::Parse {
                input: spec.label(),
            })
    };

    match spec {
        DateSpec::Today => Ok(today),
        DateSpec::WeeksAgo(n) => back(*n, DAYS_PER_WEEK),
        DateSpec::MonthsAgo(n) => back(*n, DAYS_PER_MONTH),
        DateSpec::YearsAgo(n) => back(*n, DAYS_PER_YEAR),
        DateSpec::Explicit(text) => parse_dmy(text),
    }
}

/// Parse `dd/mm/yyyy`.
pub fn parse_dmy(text: &str) -> Result<NaiveDate, CurveError> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").map_err(|_| CurveError::Parse {
        input: text.to_string(),
    })
}

/// The available date closest to `target` (earliest wins on ties).
pub fn closest_base_date<'a, I>(dates: I, target: NaiveDate) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a NaiveDate>,
{
    dates
        .into_iter()
        .copied()
        .min_by_key(|d| ((*d - target).num_days().unsigned_abs(), *d))
}

/// Resolve a date spec and snap it to the table's base dates.
///
/// `Ok(None)` means the table has no dates at all.
pub fn select_base_date(
    dates: &BTreeSet<NaiveDate>,
    spec: &DateSpec,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, CurveError> {
    let target = resolve_target(spec, today)?;
    let chosen = closest_base_date(dates, target);
    tracing::debug!(spec = %spec, %target, chosen = ?chosen, "base date selected");
    Ok(chosen)
}
