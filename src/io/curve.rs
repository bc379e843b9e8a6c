//! Write fitted curves as JSON.
//!
//! One entry per requested slot, in request order. Failed slots keep their
//! place and carry the error message instead of a curve, so consumers can
//! line entries up with the requested dates.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{CurveConfig, CurveKind, FittedCurve};
use crate::error::AppError;
use crate::fit::CurveSlot;

#[derive(Debug, Serialize)]
pub struct CurveFile<'a> {
    pub tool: &'static str,
    pub today: NaiveDate,
    pub day_count: crate::domain::DayCount,
    pub grid_samples: usize,
    pub curves: Vec<CurveEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CurveEntry<'a> {
    pub slot: usize,
    pub label: &'a str,
    pub kind: CurveKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<&'a FittedCurve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> CurveFile<'a> {
    pub fn new(slots: &'a [CurveSlot], today: NaiveDate, config: &CurveConfig) -> Self {
        let curves = slots
            .iter()
            .map(|slot| {
                let (base_date, curve, error) = match &slot.outcome {
                    Ok(o) => (Some(o.base_date), Some(&o.curve), None),
                    Err(e) => (None, None, Some(e.to_string())),
                };
                CurveEntry {
                    slot: slot.index + 1,
                    label: &slot.label,
                    kind: slot.request.kind,
                    base_date,
                    curve,
                    error,
                }
            })
            .collect();

        Self {
            tool: "tc",
            today,
            day_count: config.day_count,
            grid_samples: config.grid_samples,
            curves,
        }
    }
}

/// Write all slots to a JSON file.
pub fn write_curves_json(
    path: &Path,
    slots: &[CurveSlot],
    today: NaiveDate,
    config: &CurveConfig,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &CurveFile::new(slots, today, config))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    tracing::info!(path = %path.display(), curves = slots.len(), "curves exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveRequest, DateSpec, QuoteTable, RawQuote};
    use crate::fit::compute_curves;
    use chrono::Days;

    #[test]
    fn writes_curves_and_failures_in_order() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let quote = |days: u64, rate: f64| RawQuote {
            title: "Tesouro Prefixado".to_string(),
            maturity_date: base + Days::new(days),
            base_date: base,
            buy_rate: rate,
            sell_rate: rate,
        };
        let table = QuoteTable::from_raw(vec![quote(365, 10.0), quote(1096, 10.5)]);
        let requests = vec![
            CurveRequest { kind: CurveKind::Nominal, date: DateSpec::Today },
            CurveRequest { kind: CurveKind::Nominal, date: DateSpec::Explicit("32/01/2024".to_string()) },
        ];
        let config = CurveConfig { grid_samples: 5, ..CurveConfig::default() };
        let slots = compute_curves(&table, &requests, base, &config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curves.json");
        write_curves_json(&path, &slots, base, &config).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let curves = json["curves"].as_array().unwrap();
        assert_eq!(json["today"], "2024-01-02");
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0]["base_date"], "2024-01-02");
        assert_eq!(curves[0]["curve"]["samples"].as_array().unwrap().len(), 5);
        assert_eq!(curves[0]["curve"]["kind"], "nominal");
        assert!(curves[0].get("error").is_none());
        assert!(curves[1]["error"].as_str().unwrap().contains("32/01/2024"));
        assert!(curves[1].get("curve").is_none());
    }
}
