//! Input/output helpers.
//!
//! - Tesouro CSV ingest (`ingest`)
//! - rate table export (CSV) (`export`)
//! - curve JSON export (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
