//! Breakeven (implied inflation) curves.
//!
//! `breakeven(x) = nominal(x) - real(x)` on a shared grid spanning both
//! curves, capped at the breakeven horizon. The difference points are then
//! fitted with their own spline so the result is an ordinary `FittedCurve`.

use crate::domain::{CurveConfig, CurveKind, CurvePoint, FittedCurve};
use crate::error::CurveError;
use crate::fit::curve::fit_curve;
use crate::math::{capped_domain, lin_space};

/// Derive a breakeven curve from a nominal and a real curve.
///
/// Returns `Ok(None)` when either input is missing.
pub fn breakeven_curve(
    nominal: Option<&FittedCurve>,
    real: Option<&FittedCurve>,
    label: impl Into<String>,
    config: &CurveConfig,
) -> Result<Option<FittedCurve>, CurveError> {
    match (nominal, real) {
        (Some(nominal), Some(real)) => breakeven_between(nominal, real, label, config).map(Some),
        _ => Ok(None),
    }
}

/// Breakeven of two built curves. The base date is taken from the nominal
/// curve; callers pair curves of the same date.
pub fn breakeven_between(
    nominal: &FittedCurve,
    real: &FittedCurve,
    label: impl Into<String>,
    config: &CurveConfig,
) -> Result<FittedCurve, CurveError> {
    let (n_lo, n_hi) = nominal.spline.domain();
    let (r_lo, r_hi) = real.spline.domain();
    let (lo, hi) = capped_domain(
        n_lo.min(r_lo),
        n_hi.max(r_hi),
        Some(config.breakeven_horizon),
    );
    if hi <= lo {
        return Err(CurveError::InsufficientPoints { got: 1 });
    }

    let points: Vec<CurvePoint> = lin_space(lo, hi, config.grid_samples)
        .into_iter()
        .map(|x| CurvePoint {
            year_fraction: x,
            rate: nominal.eval(x) - real.eval(x),
        })
        .collect();

    fit_curve(
        label,
        CurveKind::Breakeven,
        nominal.base_date,
        &points,
        Some(config.breakeven_horizon),
        config,
    )
}
