//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - fitted curves: one digit per slot (`1`..`9`), first slot on top
//! - quoted maturities: `o` (not drawn for breakeven curves)

use crate::domain::{CurveKind, FittedCurve};
use crate::fit::CurveSlot;

/// Render every successful slot on one shared grid, with a legend.
pub fn render_curves_plot(slots: &[CurveSlot], width: usize, height: usize) -> String {
    let curves: Vec<(usize, &FittedCurve)> = slots
        .iter()
        .filter_map(|s| s.curve().map(|c| (s.index, c)))
        .collect();
    if curves.is_empty() {
        return "Plot: no curves to draw.\n".to_string();
    }

    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(&curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&curves);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Curves first, in slot order, so points can overlay.
    for &(index, curve) in &curves {
        draw_curve(&mut grid, &curve.samples, marker(index), x_min, x_max, y_min, y_max);
    }
    for &(_, curve) in curves.iter().filter(|(_, c)| c.kind != CurveKind::Breakeven) {
        for k in &curve.knots {
            if k.year_fraction < x_min || k.year_fraction > x_max {
                continue;
            }
            let x = map_x(k.year_fraction, x_min, x_max, width);
            let y = map_y(k.rate, y_min, y_max, height);
            grid[y][x] = 'o';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.2}, {x_max:.2}] years | rate=[{y_min:.2}, {y_max:.2}]%\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for &(index, curve) in &curves {
        out.push_str(&format!("  {} {}\n", marker(index), curve.label));
    }

    out
}

fn marker(index: usize) -> char {
    char::from_digit((index % 9 + 1) as u32, 10).unwrap_or('*')
}

fn x_range(curves: &[(usize, &FittedCurve)]) -> Option<(f64, f64)> {
    let min_x = curves.iter().map(|(_, c)| c.x_min).fold(f64::INFINITY, f64::min);
    let max_x = curves.iter().map(|(_, c)| c.x_max).fold(f64::NEG_INFINITY, f64::max);
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(curves: &[(usize, &FittedCurve)]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (_, c) in curves {
        for &(_, y) in &c.samples {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        (0.0, 1.0)
    } else if max_y > min_y {
        (min_y, max_y)
    } else {
        (min_y - 0.5, max_y + 0.5)
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    samples: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in samples {
        let x = map_x(t, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, yy, ch),
            None => draw_line(grid, x, yy, x, yy, ch),
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish). Never overwrites a filled cell.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::{CurveConfig, CurvePoint, CurveRequest, DateSpec};
    use crate::error::CurveError;
    use crate::fit::{CurveOutput, fit_curve};

    fn slot(index: usize, kind: CurveKind, label: &str, raw: &[(f64, f64)]) -> CurveSlot {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let points: Vec<CurvePoint> = raw
            .iter()
            .map(|&(year_fraction, rate)| CurvePoint { year_fraction, rate })
            .collect();
        let curve = fit_curve(label, kind, base, &points, None, &CurveConfig::default()).unwrap();
        CurveSlot {
            index,
            request: CurveRequest { kind, date: DateSpec::Today },
            label: "today".to_string(),
            outcome: Ok(CurveOutput {
                curve,
                base_date: base,
                datasets: Vec::new(),
            }),
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let slots = vec![slot(
            0,
            CurveKind::Nominal,
            "Nominal today",
            &[(1.0, 10.0), (5.0, 10.0), (10.0, 10.0)],
        )];

        let txt = render_curves_plot(&slots, 10, 5);
        let expected = concat!(
            "Plot: x=[1.00, 10.00] years | rate=[9.45, 10.55]%\n",
            "          \n",
            "          \n",
            "o111o1111o\n",
            "          \n",
            "          \n",
            "  1 Nominal today\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn breakeven_has_no_knots_and_failures_are_skipped() {
        let failed = CurveSlot {
            index: 1,
            request: CurveRequest { kind: CurveKind::Breakeven, date: DateSpec::WeeksAgo(1) },
            label: "1w ago".to_string(),
            outcome: Err(CurveError::InsufficientPoints { got: 1 }),
        };
        let slots = vec![
            slot(0, CurveKind::Breakeven, "Breakeven today", &[(1.0, 4.0), (3.0, 5.0), (5.0, 6.0)]),
            failed,
            slot(2, CurveKind::Breakeven, "Breakeven 1y ago", &[(1.0, 3.0), (5.0, 3.5)]),
        ];

        let txt = render_curves_plot(&slots, 40, 12);
        let rows: Vec<&str> = txt.lines().skip(1).take(12).collect();
        assert!(!rows.iter().any(|l| l.contains('o')));
        assert!(txt.contains("  1 Breakeven today\n"));
        assert!(txt.contains("  3 Breakeven 1y ago\n"));
        assert!(!txt.contains("  2 "));
        assert!(rows.iter().any(|l| l.contains('3')));
    }

    #[test]
    fn nothing_to_draw() {
        assert_eq!(render_curves_plot(&[], 40, 10), "Plot: no curves to draw.\n");
    }
}
