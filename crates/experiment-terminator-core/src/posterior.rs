//! Monte Carlo draws from each arm's current posterior success probability.
//!
//! The current posterior of an arm is Beta(s, f), where s and f are the
//! observed successes and failures. The shapes are taken directly from the
//! counts, with no +1 smoothing. This is not the uniform-prior posterior
//! Beta(s + 1, f + 1) that the predictive stage uses (see `predictive`); the
//! two parameterizations are kept distinct on purpose.
//!
//! A zero count makes a shape parameter zero, for which the Beta
//! distribution is undefined. [`ShapePolicy`] decides what happens then.

use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{Arm, ArmObservation};

/// What to do when an observed count of zero yields a zero Beta shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ShapePolicy {
    /// Fail with [`AnalysisError::DegenerateDistribution`].
    #[default]
    Reject,

    /// Raise a zero shape to the given positive floor.
    ///
    /// Beta(eps, f) with small eps is the limiting behaviour of the
    /// unsmoothed posterior as successes approach zero; its draws crowd
    /// against 0 (or 1 for a zero failure count).
    ///
    /// With a floored zero-success control arm many control draws are
    /// subnormal. Exact zeros are excluded from the lift, but the remaining
    /// tiny denominators give lifts near `f64::MAX` that dominate the mean;
    /// read [`LiftSampleSet::median`](crate::lift::LiftSampleSet::median)
    /// instead of `expected_lift` in that case.
    Floor(f64),
}

/// Ordered posterior draws for one arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorSampleSet {
    /// Arm the draws belong to.
    pub arm: Arm,
    draws: Vec<f64>,
}

impl PosteriorSampleSet {
    /// Wrap existing draws. Every draw must lie in [0, 1].
    pub fn from_draws(arm: Arm, draws: Vec<f64>) -> Self {
        debug_assert!(
            draws.iter().all(|p| (0.0..=1.0).contains(p)),
            "posterior draws must lie in [0, 1]"
        );
        Self { arm, draws }
    }

    /// The draws, in sampling order.
    pub fn draws(&self) -> &[f64] {
        &self.draws
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True if there are no draws.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Sample mean of the draws.
    pub fn mean(&self) -> f64 {
        if self.draws.is_empty() {
            return f64::NAN;
        }
        self.draws.iter().sum::<f64>() / self.draws.len() as f64
    }
}

/// Draws N samples from an arm's unsmoothed Beta posterior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosteriorSampler {
    samples: usize,
    policy: ShapePolicy,
}

impl PosteriorSampler {
    /// Create a sampler producing `samples` draws per arm.
    pub fn new(samples: usize, policy: ShapePolicy) -> Self {
        assert!(samples > 0, "posterior sample count must be > 0");
        if let ShapePolicy::Floor(eps) = policy {
            assert!(
                eps > 0.0 && eps.is_finite(),
                "shape floor must be positive and finite"
            );
        }
        Self { samples, policy }
    }

    /// Resolve the Beta shapes for `obs`, applying the shape policy.
    ///
    /// With no completed trials both shapes are zero and no floor can make
    /// the posterior meaningful, so that case is rejected under every policy.
    pub fn shapes(&self, arm: Arm, obs: &ArmObservation) -> Result<(f64, f64), AnalysisError> {
        let alpha = obs.successes as f64;
        let beta = obs.failures() as f64;

        let degenerate = || AnalysisError::DegenerateDistribution { arm, alpha, beta };

        if obs.completed_trials == 0 {
            return Err(degenerate());
        }
        if alpha > 0.0 && beta > 0.0 {
            return Ok((alpha, beta));
        }

        match self.policy {
            ShapePolicy::Reject => Err(degenerate()),
            ShapePolicy::Floor(eps) => Ok((alpha.max(eps), beta.max(eps))),
        }
    }

    /// Draw the posterior sample set for one arm.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        arm: Arm,
        obs: &ArmObservation,
        rng: &mut R,
    ) -> Result<PosteriorSampleSet, AnalysisError> {
        let (alpha, beta) = self.shapes(arm, obs)?;
        let dist = Beta::new(alpha, beta)
            .map_err(|_| AnalysisError::DegenerateDistribution { arm, alpha, beta })?;

        let draws = (0..self.samples).map(|_| dist.sample(rng)).collect();
        Ok(PosteriorSampleSet::from_draws(arm, draws))
    }
}
