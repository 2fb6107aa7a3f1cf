//! Default constants for the analysis.

/// Default number of Monte Carlo samples N.
///
/// Used for both the outer (posterior) and inner (predictive posterior)
/// levels of the nested simulation, so the predictive stage costs N x N draws
/// per arm.
pub const DEFAULT_MONTE_CARLO_SAMPLES: usize = 5_000;

/// Default Type I error rate. `alpha = 0.05` gives 95% credible intervals.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

// =============================================================================
// Termination rule (see `decision`)
// =============================================================================

/// Predictive probability below which the experiment is terminated with
/// "no difference expected".
pub const DEFAULT_TERMINATION_LOWER_BOUND: f64 = 0.01;

/// Predictive probability above which the experiment is terminated with
/// "difference expected".
pub const DEFAULT_TERMINATION_UPPER_BOUND: f64 = 0.99;

/// P(test > control) above which a terminable difference favours test.
pub const DEFAULT_DIRECTION_MIDPOINT: f64 = 0.5;

// =============================================================================
// Resource limits
// =============================================================================

/// Default ceiling on inner predictive draws (`2 * N * N`).
///
/// Admits N up to 10,000.
pub const DEFAULT_MAX_SIMULATION_DRAWS: u64 = 200_000_000;

/// Maximum number of bins in the lift histogram.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
