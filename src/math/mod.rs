//! Mathematical utilities: evaluation grids and natural cubic splines.

pub mod grid;
pub mod spline;

pub use grid::*;
pub use spline::*;
