//! Spline fitting of a single curve.

use chrono::NaiveDate;

use crate::domain::{CurveConfig, CurveKind, CurvePoint, FittedCurve};
use crate::error::CurveError;
use crate::math::{NaturalCubicSpline, capped_domain, lin_space};

/// Fit a natural cubic spline through `points` and sample it.
///
/// `points` must be strictly increasing in `year_fraction` (datasets are
/// unique by maturity and sorted). The sample grid spans the knot range,
/// with the upper end capped at `horizon` when given.
pub fn fit_curve(
    label: impl Into<String>,
    kind: CurveKind,
    base_date: NaiveDate,
    points: &[CurvePoint],
    horizon: Option<f64>,
    config: &CurveConfig,
) -> Result<FittedCurve, CurveError> {
    let xs: Vec<f64> = points.iter().map(|p| p.year_fraction).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.rate).collect();
    let spline = NaturalCubicSpline::fit(&xs, &ys)?;

    let (lo, hi) = spline.domain();
    let (x_min, x_max) = capped_domain(lo, hi, horizon);
    let samples = spline.sample(&lin_space(x_min, x_max, config.grid_samples));

    Ok(FittedCurve {
        label: label.into(),
        kind,
        base_date,
        knots: points.to_vec(),
        samples,
        x_min,
        x_max,
        spline,
    })
}
