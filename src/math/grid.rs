//! Evaluation grids.

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
///
/// `steps` below 2 is raised to 2. The last point is exactly `max`.
pub fn lin_space(min: f64, max: f64, steps: usize) -> Vec<f64> {
    let steps = steps.max(2);
    let step = (max - min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        out.push(min + step * i as f64);
    }
    out.push(max);
    out
}

/// Apply an optional horizon cap to a domain, never inverting it.
pub fn capped_domain(min: f64, max: f64, cap: Option<f64>) -> (f64, f64) {
    match cap {
        Some(cap) => (min, max.min(cap).max(min)),
        None => (min, max),
    }
}
