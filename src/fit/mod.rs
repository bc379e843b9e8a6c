//! Curve construction.
//!
//! Responsibilities:
//!
//! - resolve reference dates to available base dates (`date_select`)
//! - assemble per-date, per-filter datasets (`dataset`)
//! - convert maturities to year fractions (`tenor`)
//! - fit and sample natural cubic splines (`curve`)
//! - derive breakeven curves (`breakeven`)
//! - run independent requests end to end (`engine`)

pub mod breakeven;
pub mod curve;
pub mod dataset;
pub mod date_select;
pub mod engine;
pub mod tenor;

pub use breakeven::*;
pub use curve::*;
pub use dataset::*;
pub use date_select::*;
pub use engine::*;
pub use tenor::*;
