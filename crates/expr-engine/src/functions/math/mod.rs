pub mod criteria;

use statrs::statistics::Statistics;

/// Round to the nearest integer, ties to even.
pub fn rint(x: f64) -> f64 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        rounded
    }
}

/// Sign of `x`; zero and NaN map to themselves.
pub fn signum(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        x
    } else {
        x.signum()
    }
}

/// Least-squares fit `y = slope * x + intercept` over position-aligned pairs.
///
/// Returns NaN for both when fewer than two points are given or all `x` are equal.
/// Callers guarantee `ys.len() == xs.len()`.
pub fn least_squares(ys: &[f64], xs: &[f64]) -> (f64, f64) {
    if ys.len() < 2 || ys.len() != xs.len() {
        return (f64::NAN, f64::NAN);
    }
    let var_x = xs.iter().variance();
    if var_x == 0.0 {
        return (f64::NAN, f64::NAN);
    }
    let slope = xs.iter().covariance(ys.iter()) / var_x;
    let intercept = ys.iter().mean() - slope * xs.iter().mean();
    (slope, intercept)
}
