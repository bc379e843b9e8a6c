//! `tesouro-curves` library crate.
//!
//! The binary (`tc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the curve engine is reusable by other front-ends (it never reads the
//!   clock, the network or the filesystem)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
