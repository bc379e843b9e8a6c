//! The curve pipeline: one pure entry point for any front-end.
//!
//! ```text
//! DateSpec -> base date -> Dataset -> CurvePoints -> FittedCurve [-> breakeven]
//! ```
//!
//! Every request is computed independently from an immutable `QuoteTable`;
//! a failure is recorded on its own slot and never aborts the others.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::domain::{
    CurveConfig, CurveKind, CurveRequest, CurveSide, FittedCurve, InstrumentFilter, QuoteTable,
};
use crate::error::CurveError;
use crate::fit::breakeven::breakeven_between;
use crate::fit::curve::fit_curve;
use crate::fit::dataset::{Dataset, build_dataset};
use crate::fit::date_select::select_base_date;
use crate::fit::tenor::curve_points;

/// A successfully built curve plus the quotes behind it.
#[derive(Debug, Clone)]
pub struct CurveOutput {
    pub curve: FittedCurve,
    pub base_date: NaiveDate,
    /// `(column label, dataset)`; two entries for breakeven curves.
    pub datasets: Vec<(String, Dataset)>,
}

/// Outcome of one request, in request order.
#[derive(Debug, Clone)]
pub struct CurveSlot {
    pub index: usize,
    pub request: CurveRequest,
    pub label: String,
    pub outcome: Result<CurveOutput, CurveError>,
}

impl CurveSlot {
    pub fn curve(&self) -> Option<&FittedCurve> {
        self.outcome.as_ref().ok().map(|o| &o.curve)
    }
}

/// Build every requested curve. Slots are computed in parallel.
pub fn compute_curves(
    table: &QuoteTable,
    requests: &[CurveRequest],
    today: NaiveDate,
    config: &CurveConfig,
) -> Vec<CurveSlot> {
    requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            let label = request.date.label();
            let outcome = compute_curve(table, request, today, config);
            match &outcome {
                Ok(out) => tracing::info!(
                    slot = index + 1,
                    %label,
                    base_date = %out.base_date,
                    samples = out.curve.samples.len(),
                    "curve built"
                ),
                Err(err) => tracing::warn!(slot = index + 1, %label, error = %err, "curve unavailable"),
            }
            CurveSlot {
                index,
                request: request.clone(),
                label,
                outcome,
            }
        })
        .collect()
}

/// Build a single curve.
pub fn compute_curve(
    table: &QuoteTable,
    request: &CurveRequest,
    today: NaiveDate,
    config: &CurveConfig,
) -> Result<CurveOutput, CurveError> {
    let label = request.date.label();
    let Some(base_date) = select_base_date(table.base_dates(), &request.date, today)? else {
        return Err(no_base_dates(request.kind));
    };
    let curve_label = format!("{} {} ({})", request.kind.short_name(), label, base_date.format("%d/%m/%Y"));

    let Some(filter) = request.kind.filter() else {
        return breakeven_output(table, base_date, &label, curve_label, config);
    };

    let (dataset, curve) = fit_side(table, base_date, filter, request.kind, &curve_label, None, config)?;
    Ok(CurveOutput {
        curve,
        base_date,
        datasets: vec![(label, dataset)],
    })
}

fn breakeven_output(
    table: &QuoteTable,
    base_date: NaiveDate,
    label: &str,
    curve_label: String,
    config: &CurveConfig,
) -> Result<CurveOutput, CurveError> {
    let horizon = Some(config.breakeven_horizon);
    let nominal = fit_side(
        table,
        base_date,
        InstrumentFilter::Nominal,
        CurveKind::Nominal,
        "nominal",
        horizon,
        config,
    )
    .map_err(|e| unavailable(CurveSide::Nominal, e))?;
    let real = fit_side(table, base_date, InstrumentFilter::Real, CurveKind::Real, "real", horizon, config)
        .map_err(|e| unavailable(CurveSide::Real, e))?;

    let curve = breakeven_between(&nominal.1, &real.1, curve_label, config)?;

    Ok(CurveOutput {
        curve,
        base_date,
        datasets: vec![
            (format!("{label} nominal"), nominal.0),
            (format!("{label} real"), real.0),
        ],
    })
}

fn fit_side(
    table: &QuoteTable,
    base_date: NaiveDate,
    filter: InstrumentFilter,
    kind: CurveKind,
    label: &str,
    horizon: Option<f64>,
    config: &CurveConfig,
) -> Result<(Dataset, FittedCurve), CurveError> {
    let dataset = build_dataset(table, base_date, filter)?;
    let points = curve_points(&dataset, config);
    let curve = fit_curve(label, kind, base_date, &points, horizon, config)?;
    Ok((dataset, curve))
}

/// An empty table has no base date to select. Breakeven requests report
/// it against their nominal side, the first one they would build.
fn no_base_dates(kind: CurveKind) -> CurveError {
    match kind.filter() {
        Some(filter) => CurveError::EmptyDataset {
            filter,
            base_date: None,
        },
        None => unavailable(
            CurveSide::Nominal,
            CurveError::EmptyDataset {
                filter: InstrumentFilter::Nominal,
                base_date: None,
            },
        ),
    }
}

fn unavailable(side: CurveSide, err: CurveError) -> CurveError {
    CurveError::UnavailableInput {
        side,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateSpec, RawQuote};
    use approx::assert_abs_diff_eq;
    use chrono::Days;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn quote(title: &str, days: u64, rate: f64) -> RawQuote {
        RawQuote {
            title: title.to_string(),
            maturity_date: base() + Days::new(days),
            base_date: base(),
            buy_rate: rate,
            sell_rate: rate,
        }
    }

    /// Nominal and real quotes at ~1y/3y/5y.
    fn table() -> QuoteTable {
        QuoteTable::from_raw(vec![
            quote("Tesouro Prefixado", 365, 10.0),
            quote("Tesouro Prefixado", 1096, 10.5),
            quote("Tesouro Prefixado com Juros Semestrais", 1826, 11.0),
            quote("Tesouro IPCA+", 365, 5.0),
            quote("Tesouro IPCA+ com Juros Semestrais", 1096, 5.5),
            quote("Tesouro IPCA+ com Juros Semestrais", 1826, 6.0),
            quote("Tesouro Selic", 700, 0.05),
        ])
    }

    fn request(kind: CurveKind, date: DateSpec) -> CurveRequest {
        CurveRequest { kind, date }
    }

    #[test]
    fn end_to_end_breakeven_is_flat_five() {
        let today = base() + Days::new(3);
        let out = compute_curve(
            &table(),
            &request(CurveKind::Breakeven, DateSpec::Today),
            today,
            &CurveConfig::default(),
        )
        .unwrap();

        assert_eq!(out.base_date, base());
        assert_eq!(out.curve.kind, CurveKind::Breakeven);
        for x in [1.0, 3.0, 5.0] {
            assert_abs_diff_eq!(out.curve.eval(x), 5.0, epsilon = 1e-9);
        }
        let labels: Vec<_> = out.datasets.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["today nominal", "today real"]);
        assert_eq!(out.datasets[0].1.len(), 3);
    }

    #[test]
    fn nominal_curve_hits_its_quotes() {
        let out = compute_curve(
            &table(),
            &request(CurveKind::Nominal, DateSpec::on(base())),
            base(),
            &CurveConfig::default(),
        )
        .unwrap();
        assert_eq!(out.curve.knots.len(), 3);
        assert_eq!(out.curve.samples.len(), 500);
        for k in &out.curve.knots {
            assert_abs_diff_eq!(out.curve.eval(k.year_fraction), k.rate, epsilon = 1e-9);
        }
        assert_eq!(out.curve.label, "Nominal 02/01/2024 (02/01/2024)");
    }

    #[test]
    fn single_maturity_is_insufficient() {
        let table = QuoteTable::from_raw(vec![quote("Tesouro Prefixado", 400, 10.0)]);
        let err = compute_curve(
            &table,
            &request(CurveKind::Ltn, DateSpec::Today),
            base(),
            &CurveConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, CurveError::InsufficientPoints { got: 1 });
    }

    #[test]
    fn breakeven_without_real_quotes_is_unavailable() {
        let table = QuoteTable::from_raw(vec![
            quote("Tesouro Prefixado", 365, 10.0),
            quote("Tesouro Prefixado", 1096, 10.5),
        ]);
        let err = compute_curve(
            &table,
            &request(CurveKind::Breakeven, DateSpec::Today),
            base(),
            &CurveConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CurveError::UnavailableInput {
                side: CurveSide::Real,
                ..
            }
        ));
    }

    #[test]
    fn empty_table_reports_empty_dataset() {
        let err = compute_curve(
            &QuoteTable::default(),
            &request(CurveKind::Real, DateSpec::Today),
            base(),
            &CurveConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CurveError::EmptyDataset {
                filter: InstrumentFilter::Real,
                base_date: None
            }
        );
    }

    #[test]
    fn empty_table_breakeven_is_unavailable_input() {
        let err = compute_curve(
            &QuoteTable::default(),
            &request(CurveKind::Breakeven, DateSpec::Today),
            base(),
            &CurveConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CurveError::UnavailableInput {
                side: CurveSide::Nominal,
                ..
            }
        ));
    }

    #[test]
    fn non_ascii_date_fails_only_its_slot() {
        let requests: Vec<CurveRequest> = ["today", "amanhã"]
            .iter()
            .map(|d| request(CurveKind::Nominal, DateSpec::parse(d)))
            .collect();
        let slots = compute_curves(&table(), &requests, base(), &CurveConfig::default());

        assert_eq!(slots.len(), 2);
        assert!(slots[0].curve().is_some());
        assert_eq!(
            slots[1].outcome.as_ref().unwrap_err(),
            &CurveError::Parse {
                input: "amanhã".to_string()
            }
        );
    }

    #[test]
    fn failed_slot_does_not_affect_siblings() {
        let requests = vec![
            request(CurveKind::Real, DateSpec::Today),
            request(CurveKind::Real, DateSpec::Explicit("31/31/2024".to_string())),
            request(CurveKind::Nominal, DateSpec::WeeksAgo(1)),
        ];
        let slots = compute_curves(&table(), &requests, base(), &CurveConfig::default());

        assert_eq!(slots.len(), 3);
        assert_eq!(slots.iter().map(|s| s.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(slots[0].curve().is_some());
        assert!(matches!(slots[1].outcome, Err(CurveError::Parse { .. })));
        assert!(slots[2].curve().is_some());
        assert_eq!(slots[2].label, "1w ago");
    }
}
