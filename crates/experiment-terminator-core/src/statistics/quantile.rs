//! Empirical quantiles by linear interpolation between order statistics.
//!
//! Implements Type 7 of Hyndman & Fan (1996), the default of most numerical
//! packages:
//!
//! ```text
//! h = (n - 1) * p
//! q = x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])
//! ```
//!
//! with `x` the sorted sample (0-based).
//!
//! # Input Requirements
//!
//! All input data must be finite. In debug builds this is checked via
//! assertions.
//!
//! # Reference
//!
//! Hyndman, R. J. & Fan, Y. (1996). "Sample quantiles in statistical packages."
//! The American Statistician 50(4):361–365.

/// Debug assertion that all values in the slice are finite.
#[inline]
fn debug_assert_finite(data: &[f64]) {
    debug_assert!(
        data.iter().all(|x| x.is_finite()),
        "quantile input must be finite (no NaN or infinity)"
    );
}

/// Compute a single Type 7 quantile from a mutable slice.
///
/// Uses `select_nth_unstable_by()` for O(n) expected time. The slice is
/// partially reordered as a side effect.
///
/// # Panics
///
/// Panics if `data` is empty or if `p` is outside [0, 1].
pub fn compute_quantile(data: &mut [f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );
    debug_assert_finite(data);

    let n = data.len();
    if n == 1 {
        return data[0];
    }

    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let frac = h - lo as f64;

    let cmp = |a: &f64, b: &f64| a.total_cmp(b);
    let (_, mid, upper) = data.select_nth_unstable_by(lo, cmp);
    let lo_val = *mid;

    if frac == 0.0 || upper.is_empty() {
        return lo_val;
    }

    // x[lo + 1] is the smallest element of the right partition
    let hi_val = upper.iter().copied().fold(f64::INFINITY, f64::min);
    lo_val + frac * (hi_val - lo_val)
}

/// Compute a Type 7 quantile from already sorted data.
///
/// # Panics
///
/// Panics if `sorted` is empty or if `p` is outside [0, 1].
pub fn compute_quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "Cannot compute quantile of empty slice");
    assert!(
        (0.0..=1.0).contains(&p),
        "Quantile probability must be in [0, 1]"
    );
    debug_assert!(
        sorted.windows(2).all(|w| w[0] <= w[1]),
        "input must be sorted"
    );

    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Central `1 - alpha` credible interval `(q(alpha/2), q(1 - alpha/2))`.
///
/// The slice is partially reordered as a side effect.
///
/// # Panics
///
/// Panics if `data` is empty or `alpha` is outside (0, 1).
pub fn credible_interval(data: &mut [f64], alpha: f64) -> (f64, f64) {
    assert!(
        alpha > 0.0 && alpha < 1.0,
        "alpha must be in (0, 1)"
    );
    let lower = compute_quantile(data, alpha / 2.0);
    let upper = compute_quantile(data, 1.0 - alpha / 2.0);
    (lower, upper)
}

/// True if the interval lies entirely above or entirely below zero.
#[inline]
pub fn interval_excludes_zero(interval: (f64, f64)) -> bool {
    interval.0 > 0.0 || interval.1 < 0.0
}
