//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory by the curve pipeline
//! - exported to JSON/CSV
//! - rendered by any front-end (terminal today)

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::NaturalCubicSpline;

/// Day-count convention for year fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DayCount {
    /// Actual/365.25.
    #[serde(rename = "act/365.25")]
    #[value(name = "act/365.25")]
    Act365_25,
    /// Actual/365 fixed.
    #[serde(rename = "act/365f")]
    #[value(name = "act/365f")]
    Act365F,
}

impl DayCount {
    /// Convert a day count to its denominator.
    pub fn year_denominator(self) -> f64 {
        match self {
            DayCount::Act365_25 => 365.25,
            DayCount::Act365F => 365.0,
        }
    }
}

/// Closed set of Tesouro Direto instrument classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentClass {
    /// Fixed-rate with semiannual coupon (NTN-F).
    NominalCoupon,
    /// Fixed-rate zero coupon (LTN).
    NominalZero,
    /// IPCA-linked with semiannual coupon (NTN-B).
    RealCoupon,
    /// IPCA-linked zero coupon (NTN-B Principal).
    RealZero,
    /// Anything else (Selic, IGP-M, Renda+, ...). Never fitted.
    Unknown,
}

impl InstrumentClass {
    /// Market code used in display names, `None` for `Unknown`.
    pub fn code(self) -> Option<&'static str> {
        match self {
            InstrumentClass::NominalCoupon => Some("NTN-F"),
            InstrumentClass::NominalZero => Some("LTN"),
            InstrumentClass::RealCoupon => Some("NTN-B"),
            InstrumentClass::RealZero => Some("NTN-B Principal"),
            InstrumentClass::Unknown => None,
        }
    }
}

/// Which instrument classes make up a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentFilter {
    /// LTN + NTN-F.
    Nominal,
    /// NTN-B + NTN-B Principal.
    Real,
    /// A single known class.
    Only(InstrumentClass),
}

impl InstrumentFilter {
    pub fn matches(self, class: InstrumentClass) -> bool {
        match self {
            InstrumentFilter::Nominal => matches!(
                class,
                InstrumentClass::NominalCoupon | InstrumentClass::NominalZero
            ),
            InstrumentFilter::Real => {
                matches!(class, InstrumentClass::RealCoupon | InstrumentClass::RealZero)
            }
            InstrumentFilter::Only(InstrumentClass::Unknown) => false,
            InstrumentFilter::Only(only) => only == class,
        }
    }
}

impl fmt::Display for InstrumentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentFilter::Nominal => write!(f, "nominal"),
            InstrumentFilter::Real => write!(f, "real"),
            InstrumentFilter::Only(class) => write!(f, "{}", class.code().unwrap_or("unknown")),
        }
    }
}

/// Curve type requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Fixed-rate curve (LTN + NTN-F).
    #[value(alias = "prefixada")]
    Nominal,
    /// Inflation-linked curve (NTN-B + NTN-B Principal).
    #[value(alias = "ipca")]
    Real,
    /// Implied inflation: nominal minus real.
    #[value(alias = "implicita")]
    Breakeven,
    Ltn,
    NtnF,
    NtnB,
    NtnBPrincipal,
}

impl CurveKind {
    /// Instrument filter for single-dataset kinds, `None` for breakeven.
    pub fn filter(self) -> Option<InstrumentFilter> {
        match self {
            CurveKind::Nominal => Some(InstrumentFilter::Nominal),
            CurveKind::Real => Some(InstrumentFilter::Real),
            CurveKind::Breakeven => None,
            CurveKind::Ltn => Some(InstrumentFilter::Only(InstrumentClass::NominalZero)),
            CurveKind::NtnF => Some(InstrumentFilter::Only(InstrumentClass::NominalCoupon)),
            CurveKind::NtnB => Some(InstrumentFilter::Only(InstrumentClass::RealCoupon)),
            CurveKind::NtnBPrincipal => Some(InstrumentFilter::Only(InstrumentClass::RealZero)),
        }
    }

    /// Legend prefix.
    pub fn short_name(self) -> &'static str {
        match self {
            CurveKind::Nominal => "Nominal",
            CurveKind::Real => "Real",
            CurveKind::Breakeven => "Breakeven",
            CurveKind::Ltn => "LTN",
            CurveKind::NtnF => "NTN-F",
            CurveKind::NtnB => "NTN-B",
            CurveKind::NtnBPrincipal => "NTN-B Principal",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CurveKind::Nominal => "Nominal (LTN + NTN-F)",
            CurveKind::Real => "Real (NTN-B + NTN-B Principal)",
            CurveKind::Breakeven => "Breakeven inflation",
            CurveKind::Ltn => "LTN",
            CurveKind::NtnF => "NTN-F",
            CurveKind::NtnB => "NTN-B",
            CurveKind::NtnBPrincipal => "NTN-B Principal",
        }
    }
}

/// The two constituents of a breakeven curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveSide {
    Nominal,
    Real,
}

impl fmt::Display for CurveSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveSide::Nominal => write!(f, "nominal"),
            CurveSide::Real => write!(f, "real"),
        }
    }
}

/// A locale-normalized row handed over by the ingest boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    pub title: String,
    pub maturity_date: NaiveDate,
    pub base_date: NaiveDate,
    pub buy_rate: f64,
    pub sell_rate: f64,
}

/// A canonicalized quote row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    pub class: InstrumentClass,
    /// `NTN-B 2030`, `LTN 2027`, ... or the raw title for `Unknown`.
    pub code: String,
    pub maturity_date: NaiveDate,
    pub base_date: NaiveDate,
    pub buy_rate: f64,
    pub sell_rate: f64,
    /// Mid of buy/sell, rounded to 2 decimals.
    pub indicative_rate: f64,
}

/// Mid of buy and sell rates, rounded to two decimal places.
pub fn indicative_rate(buy: f64, sell: f64) -> f64 {
    (((buy + sell) / 2.0) * 100.0).round() / 100.0
}

/// A single spline knot: time to maturity (years) and rate (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub year_fraction: f64,
    pub rate: f64,
}

/// A fitted curve sampled on a dense grid.
#[derive(Debug, Clone, Serialize)]
pub struct FittedCurve {
    pub label: String,
    pub kind: CurveKind,
    pub base_date: NaiveDate,
    pub knots: Vec<CurvePoint>,
    /// `(year_fraction, rate)` samples, ascending in x.
    pub samples: Vec<(f64, f64)>,
    pub x_min: f64,
    /// Upper bound of `samples` (after any horizon cap).
    pub x_max: f64,
    #[serde(skip)]
    pub spline: NaturalCubicSpline,
}

impl FittedCurve {
    /// Evaluate the underlying spline (extrapolates outside the knots).
    pub fn eval(&self, x: f64) -> f64 {
        self.spline.eval(x)
    }
}

/// Reference-date specification for one curve slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateSpec {
    Today,
    WeeksAgo(u32),
    MonthsAgo(u32),
    YearsAgo(u32),
    /// Caller text in `dd/mm/yyyy`; parsed when the slot is resolved.
    Explicit(String),
}

impl DateSpec {
    /// Parse a user-facing spec: `today`/`hoje`/`0d`, `<n>w`, `<n>m`, `<n>y`.
    ///
    /// Anything else is kept as an explicit date and validated later, so a
    /// typo fails only its own slot.
    pub fn parse(input: &str) -> Self {
        let s = input.trim();
        let lower = s.to_ascii_lowercase();
        if matches!(lower.as_str(), "today" | "hoje" | "0d") {
            return DateSpec::Today;
        }

        if let Some(unit) = lower.chars().last() {
            let num = &lower[..lower.len() - unit.len_utf8()];
            if let Ok(n) = num.parse::<u32>() {
                match unit {
                    'w' => return DateSpec::WeeksAgo(n),
                    'm' => return DateSpec::MonthsAgo(n),
                    'y' => return DateSpec::YearsAgo(n),
                    _ => {}
                }
            }
        }

        DateSpec::Explicit(s.to_string())
    }

    /// Explicit spec from a calendar date.
    pub fn on(date: NaiveDate) -> Self {
        DateSpec::Explicit(date.format("%d/%m/%Y").to_string())
    }

    /// Short label used for curve legends and table columns.
    pub fn label(&self) -> String {
        match self {
            DateSpec::Today => "today".to_string(),
            DateSpec::WeeksAgo(n) => format!("{n}w ago"),
            DateSpec::MonthsAgo(n) => format!("{n}m ago"),
            DateSpec::YearsAgo(n) => format!("{n}y ago"),
            DateSpec::Explicit(s) => s.clone(),
        }
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One curve to build: what to fit, and for which date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveRequest {
    pub kind: CurveKind,
    pub date: DateSpec,
}

/// Numerical settings of the curve engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveConfig {
    /// Samples per fitted curve.
    pub grid_samples: usize,
    /// Cap (years) on the x-range of breakeven-related curves.
    pub breakeven_horizon: f64,
    /// Points with `year_fraction < -stale_tolerance` are dropped.
    pub stale_tolerance: f64,
    pub day_count: DayCount,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            grid_samples: 500,
            breakeven_horizon: 10.0,
            stale_tolerance: 0.5,
            day_count: DayCount::Act365_25,
        }
    }
}

/// Where the quote file comes from.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    pub local_path: PathBuf,
    /// Skip the download and read `local_path` directly.
    pub offline: bool,
}
