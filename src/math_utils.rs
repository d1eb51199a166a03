//! Mathematical utility functions for the laboratory engine
//!
//! Rounding for display, relative-error checks, and the ordinary least squares
//! line used by trend lines and calibration.

use serde::{Deserialize, Serialize};

/// Panic unless `actual` is within a relative `tolerance` of `expected`.
///
/// The tolerance is a fraction of `expected` (`1e-6` means one part per million),
/// measured with [`relative_error`](crate::math_utils::relative_error).
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        $crate::assert_close!($actual, $expected, $tolerance, "values are not close")
    };
    ($actual:expr, $expected:expr, $tolerance:expr, $($msg:tt)+) => {{
        let (actual, expected, tolerance): (f64, f64, f64) = ($actual, $expected, $tolerance);
        let error = $crate::math_utils::relative_error(actual, expected);
        if !(error <= tolerance) {
            panic!(
                "{}: relative error {:e} exceeds {:e} (actual {}, expected {})",
                format_args!($($msg)+),
                error,
                tolerance,
                actual,
                expected
            );
        }
    }};
}

/// Round a value to a fixed number of decimal places
///
/// # Examples
/// ```
/// use electro_lab_sim::math_utils::round_to;
///
/// assert_eq!(round_to(0.083333, 4), 0.0833);
/// assert_eq!(round_to(101.7284, 2), 101.73);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// `|actual - expected| / |expected|` as a fraction.
///
/// Against a zero reference any difference is infinitely large.
///
/// ```
/// use electro_lab_sim::math_utils::relative_error;
///
/// assert!((relative_error(0.0525, 0.05) - 0.05).abs() < 1e-12);
/// assert_eq!(relative_error(0.0, 0.0), 0.0);
/// assert!(relative_error(1e-9, 0.0).is_infinite());
/// ```
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    let difference = (actual - expected).abs();
    if difference == 0.0 {
        0.0
    } else if expected == 0.0 {
        f64::INFINITY
    } else {
        difference / expected.abs()
    }
}

/// A straight line `y = slope·x + intercept` fitted by ordinary least squares
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when every point lies on the line
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Invert the line: the x at which it reaches `y`.
    /// `None` when the line is flat.
    pub fn solve_for_x(&self, y: f64) -> Option<f64> {
        if self.slope.abs() < f64::EPSILON {
            None
        } else {
            Some((y - self.intercept) / self.slope)
        }
    }
}

/// Fit `ys` against `xs`, minimizing squared vertical residuals
///
/// Returns `None` with fewer than two points, mismatched lengths,
/// or when every x is the same (no unique line).
///
/// # Examples
/// ```
/// use electro_lab_sim::math_utils::least_squares;
///
/// let fit = least_squares(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// ```
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx.abs() < f64::EPSILON * n {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let r_squared = if syy.abs() < f64::EPSILON {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}
