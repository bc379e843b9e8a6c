//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - instrument classes, filters and curve kinds
//! - quote rows before (`RawQuote`) and after (`QuoteRecord`) canonicalization
//! - the immutable `QuoteTable`
//! - curve requests, configuration and fitted outputs

pub mod instrument;
pub mod quotes;
pub mod types;

pub use quotes::QuoteTable;
pub use types::*;
