//! Natural cubic spline.
//!
//! On each interval `[x_i, x_{i+1}]` the curve is
//!
//! ```text
//! s_i(x) = a_i + b_i·dx + c_i·dx² + d_i·dx³,   dx = x - x_i
//! ```
//!
//! with second derivatives `M_i` solving the usual tridiagonal system
//!
//! ```text
//! h_{i-1}·M_{i-1} + 2(h_{i-1}+h_i)·M_i + h_i·M_{i+1} = 6·(Δ_i - Δ_{i-1})
//! ```
//!
//! and the natural boundary `M_0 = M_{n-1} = 0`. Two knots degenerate to a
//! straight line. Outside the knot range the end segments are extended.

use nalgebra::{DMatrix, DVector};

use crate::error::CurveError;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

/// A fitted natural cubic spline through `(x_i, y_i)` knots.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    segments: Vec<Segment>,
    last_y: f64,
}

impl NaturalCubicSpline {
    /// Fit a spline through knots with strictly increasing `xs`.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, CurveError> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return Err(CurveError::InsufficientPoints { got: n });
        }
        let xs = &xs[..n];
        let ys = &ys[..n];
        if xs.windows(2).any(|w| w[1] <= w[0] || !w[1].is_finite()) {
            return Err(CurveError::SingularSystem { knots: n });
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let slopes: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();
        let m = second_derivatives(&h, &slopes).ok_or(CurveError::SingularSystem { knots: n })?;

        let segments = (0..n - 1)
            .map(|i| Segment {
                a: ys[i],
                b: slopes[i] - h[i] * (2.0 * m[i] + m[i + 1]) / 6.0,
                c: m[i] / 2.0,
                d: (m[i + 1] - m[i]) / (6.0 * h[i]),
            })
            .collect();

        Ok(Self {
            xs: xs.to_vec(),
            segments,
            last_y: ys[n - 1],
        })
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 1;
        if x == self.xs[last] {
            return self.last_y;
        }

        let idx = self
            .xs
            .partition_point(|&k| k <= x)
            .saturating_sub(1)
            .min(self.segments.len() - 1);
        let s = &self.segments[idx];
        let dx = x - self.xs[idx];
        s.a + dx * (s.b + dx * (s.c + dx * s.d))
    }

    /// Evaluate on every grid point, returning `(x, y)` pairs.
    pub fn sample(&self, grid: &[f64]) -> Vec<(f64, f64)> {
        grid.iter().map(|&x| (x, self.eval(x))).collect()
    }

    pub fn knots_x(&self) -> &[f64] {
        &self.xs
    }

    /// `(first knot, last knot)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// Solve for the knot second derivatives, natural boundary included.
fn second_derivatives(h: &[f64], slopes: &[f64]) -> Option<Vec<f64>> {
    let n = h.len() + 1;
    let interior = n - 2;
    let mut m = vec![0.0; n];
    if interior == 0 {
        return Some(m);
    }

    let mut a = DMatrix::<f64>::zeros(interior, interior);
    let mut rhs = DVector::<f64>::zeros(interior);
    for row in 0..interior {
        let i = row + 1;
        a[(row, row)] = 2.0 * (h[i - 1] + h[i]);
        if row > 0 {
            a[(row, row - 1)] = h[i - 1];
        }
        if row + 1 < interior {
            a[(row, row + 1)] = h[i];
        }
        rhs[row] = 6.0 * (slopes[i] - slopes[i - 1]);
    }

    let solved = a.lu().solve(&rhs)?;
    if !solved.iter().all(|v| v.is_finite()) {
        return None;
    }
    m[1..=interior].copy_from_slice(solved.as_slice());
    Some(m)
}
