use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{CurveSide, InstrumentFilter};

/// Application-level failure carrying the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a single curve slot could not be produced.
///
/// These never abort a multi-curve run: the pipeline records them next to
/// the slot and keeps going with its siblings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// An explicit reference date was not in `dd/mm/yyyy` form.
    #[error("invalid reference date '{input}' (expected dd/mm/yyyy)")]
    Parse { input: String },

    /// No quotes for the filter on the selected base date.
    #[error("no {filter} quotes available on {}", fmt_base_date(.base_date))]
    EmptyDataset {
        filter: InstrumentFilter,
        base_date: Option<NaiveDate>,
    },

    /// A spline needs at least two distinct maturities.
    #[error("need at least 2 distinct maturities to fit a curve, got {got}")]
    InsufficientPoints { got: usize },

    /// One side of a breakeven pair could not be built.
    #[error("breakeven unavailable: {side} curve missing ({reason})")]
    UnavailableInput { side: CurveSide, reason: String },

    #[error("spline system could not be solved for {knots} knots")]
    SingularSystem { knots: usize },
}

fn fmt_base_date(date: &Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "any date".to_string(),
    }
}
