//! Configuration for experiment termination analysis.

use serde::{Deserialize, Serialize};

use experiment_terminator_core::constants::{
    DEFAULT_DIRECTION_MIDPOINT, DEFAULT_MAX_SIMULATION_DRAWS, DEFAULT_MONTE_CARLO_SAMPLES,
    DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_TERMINATION_LOWER_BOUND, DEFAULT_TERMINATION_UPPER_BOUND,
};
use experiment_terminator_core::predictive::required_draws;
use experiment_terminator_core::{AnalysisError, DecisionThresholds, ShapePolicy};

/// Configuration options for [`ExperimentTerminator`](crate::ExperimentTerminator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Simulation
    // =========================================================================
    /// Number of Monte Carlo samples N.
    ///
    /// Controls both the number of current-posterior draws (outer scenarios)
    /// and the number of inner draws per scenario, so the predictive stage
    /// costs `2 * N * N` Beta draws. Default: 5,000.
    pub monte_carlo_samples: usize,

    /// Type I error rate of the end-of-experiment credible interval.
    ///
    /// `0.05` gives a 95% interval. Default: 0.05.
    pub significance_level: f64,

    /// Ceiling on inner predictive draws (`2 * N * N`).
    ///
    /// Bounds worst-case latency; analyses above it fail before sampling.
    /// Default: 200,000,000 (N up to 10,000).
    pub max_simulation_draws: u64,

    /// Handling of zero Beta shapes in the current posterior.
    ///
    /// Default: `ShapePolicy::Reject`.
    pub shape_policy: ShapePolicy,

    /// Optional deterministic seed.
    ///
    /// When set, repeated analyses of the same counts return identical
    /// results. Default: None (fresh seed per call, reported in the result).
    pub seed: Option<u64>,

    // =========================================================================
    // Termination rule
    // =========================================================================
    /// Terminate with "no difference" when P(significant at end) is below
    /// this. Default: 0.01.
    pub termination_lower_bound: f64,

    /// Terminate with "difference" when P(significant at end) is above this.
    /// Default: 0.99.
    pub termination_upper_bound: f64,

    /// P(test > control) above which a terminable difference favours test.
    /// Default: 0.5.
    pub direction_midpoint: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monte_carlo_samples: DEFAULT_MONTE_CARLO_SAMPLES,
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            max_simulation_draws: DEFAULT_MAX_SIMULATION_DRAWS,
            shape_policy: ShapePolicy::Reject,
            seed: None,
            termination_lower_bound: DEFAULT_TERMINATION_LOWER_BOUND,
            termination_upper_bound: DEFAULT_TERMINATION_UPPER_BOUND,
            direction_midpoint: DEFAULT_DIRECTION_MIDPOINT,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default configuration (N = 5,000).
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create a quick configuration for interactive use.
    ///
    /// N = 1,000: about 25x cheaper than the default, with roughly twice
    /// the Monte Carlo error.
    pub fn quick() -> Self {
        Self {
            monte_carlo_samples: 1_000,
            ..Default::default()
        }
    }

    /// Create a thorough configuration for final calls.
    ///
    /// N = 10,000, the largest size the default draw budget admits.
    pub fn thorough() -> Self {
        Self {
            monte_carlo_samples: 10_000,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the Monte Carlo sample count N.
    pub fn monte_carlo_samples(mut self, n: usize) -> Self {
        assert!(n > 0, "monte_carlo_samples must be > 0");
        self.monte_carlo_samples = n;
        self
    }

    /// Set the significance level alpha.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "significance_level must be in (0, 1)"
        );
        self.significance_level = alpha;
        self
    }

    /// Set the lower termination bound.
    pub fn termination_lower_bound(mut self, bound: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&bound),
            "termination_lower_bound must be in [0, 1]"
        );
        assert!(
            bound < self.termination_upper_bound,
            "termination_lower_bound must be < termination_upper_bound"
        );
        self.termination_lower_bound = bound;
        self
    }

    /// Set the upper termination bound.
    pub fn termination_upper_bound(mut self, bound: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&bound),
            "termination_upper_bound must be in [0, 1]"
        );
        assert!(
            bound > self.termination_lower_bound,
            "termination_upper_bound must be > termination_lower_bound"
        );
        self.termination_upper_bound = bound;
        self
    }

    /// Set the direction midpoint.
    pub fn direction_midpoint(mut self, midpoint: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&midpoint),
            "direction_midpoint must be in [0, 1]"
        );
        self.direction_midpoint = midpoint;
        self
    }

    /// Set the simulation draw ceiling.
    pub fn max_simulation_draws(mut self, max: u64) -> Self {
        assert!(max > 0, "max_simulation_draws must be > 0");
        self.max_simulation_draws = max;
        self
    }

    /// Set the zero-shape policy.
    pub fn shape_policy(mut self, policy: ShapePolicy) -> Self {
        if let ShapePolicy::Floor(eps) = policy {
            assert!(
                eps > 0.0 && eps.is_finite(),
                "shape floor must be positive and finite"
            );
        }
        self.shape_policy = policy;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    // =========================================================================
    // Resolution methods
    // =========================================================================

    /// Termination thresholds as used by the decision rule.
    pub fn thresholds(&self) -> DecisionThresholds {
        DecisionThresholds {
            lower: self.termination_lower_bound,
            upper: self.termination_upper_bound,
            direction_midpoint: self.direction_midpoint,
        }
    }

    /// Inner predictive draws this configuration requires.
    pub fn simulation_draws(&self) -> u64 {
        required_draws(self.monte_carlo_samples)
    }

    /// Check that the configuration is valid.
    ///
    /// Fields set directly (or deserialized) bypass the builder assertions;
    /// this re-checks them and also enforces the simulation budget.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |msg: &str| Err(AnalysisError::InvalidConfig(msg.to_string()));

        if self.monte_carlo_samples == 0 {
            return invalid("monte_carlo_samples must be > 0");
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return invalid("significance_level must be in (0, 1)");
        }
        if !(0.0..=1.0).contains(&self.termination_lower_bound)
            || !(0.0..=1.0).contains(&self.termination_upper_bound)
        {
            return invalid("termination bounds must be in [0, 1]");
        }
        if self.termination_lower_bound >= self.termination_upper_bound {
            return invalid("termination_lower_bound must be < termination_upper_bound");
        }
        if !(0.0..=1.0).contains(&self.direction_midpoint) {
            return invalid("direction_midpoint must be in [0, 1]");
        }
        if let ShapePolicy::Floor(eps) = self.shape_policy {
            if !(eps > 0.0 && eps.is_finite()) {
                return invalid("shape floor must be positive and finite");
            }
        }

        let requested = self.simulation_draws();
        if requested > self.max_simulation_draws {
            return Err(AnalysisError::SimulationBudgetExceeded {
                requested,
                limit: self.max_simulation_draws,
            });
        }
        Ok(())
    }
}
