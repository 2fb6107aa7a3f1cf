//! Posterior-predictive probability that the experiment ends significant.
//!
//! This is a nested two-level Monte Carlo simulation:
//!
//! 1. **Outer level.** For each current posterior draw `p[i]` of an arm,
//!    simulate the rest of the experiment: `final[i] = successes +
//!    Binomial(planned - completed, p[i])`.
//! 2. **Inner level.** For each outer scenario, draw N samples from the
//!    posterior that would exist at the planned end,
//!    Beta(final + 1, planned - final + 1), for both arms. This
//!    Laplace-smoothed form differs from the unsmoothed
//!    current posterior in `posterior`.
//! 3. **Criterion.** The scenario rejects the null if the central
//!    `1 - alpha` interval of `test - control` (Type 7 quantiles) excludes
//!    zero.
//!
//! The estimate is the fraction of rejecting scenarios. With N outer and N
//! inner draws per arm the cost is `2 * N * N` Beta draws, which dominates
//! the whole analysis.
//!
//! ## Determinism and parallelism
//!
//! Outer scenarios are independent. Scenario `i` runs on its own
//! `Xoshiro256PlusPlus`, seeded by mixing a base seed (drawn once from the
//! caller's RNG) with `i`. The result is therefore identical whether the
//! scenarios run serially or across a rayon pool (feature `parallel`), and
//! independent of the thread count.

use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Binomial, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::posterior::PosteriorSampleSet;
use crate::statistics::{credible_interval, interval_excludes_zero};
use crate::types::{Arm, ArmObservation};

/// Result of the predictive simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictiveEstimate {
    /// Fraction of outer scenarios whose end-of-experiment credible
    /// interval excludes zero.
    pub prob_reject: f64,
    /// Number of outer scenarios simulated.
    pub scenarios: usize,
    /// Number of scenarios that rejected the null.
    pub rejections: usize,
}

/// Number of inner Beta draws needed for `samples` outer scenarios with
/// `samples` inner draws per arm.
pub fn required_draws(samples: usize) -> u64 {
    let n = samples as u64;
    n.saturating_mul(n).saturating_mul(2)
}

/// Derive a well-mixed per-scenario seed from a base seed and a counter.
///
/// SplitMix64 finalizer over `seed + (counter + 1) * golden_gamma`.
pub fn counter_rng_seed(seed: u64, counter: u64) -> u64 {
    let mut z = seed.wrapping_add(counter.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulate final success counts for one arm, one per posterior draw.
///
/// Each entry lies in `[successes, planned_trials]`. With no remaining
/// trials the observed successes pass through unchanged and the RNG is not
/// touched.
pub fn simulate_final_successes<R: Rng + ?Sized>(
    obs: &ArmObservation,
    posterior: &PosteriorSampleSet,
    rng: &mut R,
) -> Result<Vec<u64>, AnalysisError> {
    if obs.is_complete() {
        return Ok(vec![obs.successes; posterior.len()]);
    }
    let remaining = obs.remaining_trials();

    posterior
        .draws()
        .iter()
        .map(|&p| {
            let future = Binomial::new(remaining, p)
                .map_err(|e| {
                    AnalysisError::InvariantViolation(format!(
                        "Binomial({remaining}, {p}) for {} arm: {e}",
                        posterior.arm
                    ))
                })?
                .sample(rng);
            let total = obs.successes + future;
            if total > obs.planned_trials {
                return Err(AnalysisError::InvariantViolation(format!(
                    "{} arm simulated {total} successes out of {} planned trials",
                    posterior.arm, obs.planned_trials
                )));
            }
            Ok(total)
        })
        .collect()
}

/// Laplace-smoothed posterior Beta(s + 1, n - s + 1) at the planned end.
fn smoothed_posterior(arm: Arm, successes: u64, planned: u64) -> Result<Beta<f64>, AnalysisError> {
    if successes > planned {
        return Err(AnalysisError::InvariantViolation(format!(
            "{arm} arm final successes {successes} exceed planned trials {planned}"
        )));
    }
    let alpha = (successes + 1) as f64;
    let beta = (planned - successes + 1) as f64;
    Beta::new(alpha, beta).map_err(|e| {
        AnalysisError::InvariantViolation(format!("Beta({alpha}, {beta}) for {arm} arm: {e}"))
    })
}

/// Estimates P(significant at planned end) by nested simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictiveRejectionEstimator {
    inner_samples: usize,
    alpha: f64,
}

impl PredictiveRejectionEstimator {
    /// Create an estimator with `inner_samples` draws per arm per scenario
    /// and credible-interval level `1 - alpha`.
    pub fn new(inner_samples: usize, alpha: f64) -> Self {
        assert!(inner_samples > 0, "inner sample count must be > 0");
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        Self {
            inner_samples,
            alpha,
        }
    }

    /// Run the simulation.
    ///
    /// One outer scenario is simulated per current posterior draw; the two
    /// posterior sets must have equal length.
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        control: &ArmObservation,
        test: &ArmObservation,
        control_posterior: &PosteriorSampleSet,
        test_posterior: &PosteriorSampleSet,
        rng: &mut R,
    ) -> Result<PredictiveEstimate, AnalysisError> {
        if control_posterior.len() != test_posterior.len() {
            return Err(AnalysisError::InvariantViolation(format!(
                "unpaired posterior sets: {} control vs {} test draws",
                control_posterior.len(),
                test_posterior.len()
            )));
        }

        let final_control = simulate_final_successes(control, control_posterior, rng)?;
        let final_test = simulate_final_successes(test, test_posterior, rng)?;

        let scenarios = final_control
            .iter()
            .zip(&final_test)
            .map(|(&c, &t)| {
                Ok((
                    smoothed_posterior(Arm::Control, c, control.planned_trials)?,
                    smoothed_posterior(Arm::Test, t, test.planned_trials)?,
                ))
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        let seed: u64 = rng.random();
        let rejections = self.count_rejections(&scenarios, seed);
        let n = scenarios.len();

        tracing::debug!(
            scenarios = n,
            inner = self.inner_samples,
            rejections,
            "predictive simulation finished"
        );

        Ok(PredictiveEstimate {
            prob_reject: if n == 0 { 0.0 } else { rejections as f64 / n as f64 },
            scenarios: n,
            rejections,
        })
    }

    #[cfg(feature = "parallel")]
    fn count_rejections(&self, scenarios: &[(Beta<f64>, Beta<f64>)], seed: u64) -> usize {
        self.count_rejections_parallel(scenarios, seed)
    }

    #[cfg(not(feature = "parallel"))]
    fn count_rejections(&self, scenarios: &[(Beta<f64>, Beta<f64>)], seed: u64) -> usize {
        self.count_rejections_serial(scenarios, seed)
    }

    #[cfg(feature = "parallel")]
    fn count_rejections_parallel(
        &self,
        scenarios: &[(Beta<f64>, Beta<f64>)],
        seed: u64,
    ) -> usize {
        scenarios
            .par_iter()
            .enumerate()
            .fold_with(
                // Per-thread state: scratch buffer and local count
                (vec![0.0; self.inner_samples], 0usize),
                |(mut buffer, count), (i, (control, test))| {
                    let mut rng =
                        Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
                    let hit = self.scenario_rejects(control, test, &mut rng, &mut buffer);
                    (buffer, count + usize::from(hit))
                },
            )
            .map(|(_, count)| count)
            .sum()
    }

    // Reference path for the parallel build; must count identically.
    #[cfg(any(test, not(feature = "parallel")))]
    fn count_rejections_serial(&self, scenarios: &[(Beta<f64>, Beta<f64>)], seed: u64) -> usize {
        let mut buffer = vec![0.0; self.inner_samples];
        let mut count = 0;
        for (i, (control, test)) in scenarios.iter().enumerate() {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(counter_rng_seed(seed, i as u64));
            if self.scenario_rejects(control, test, &mut rng, &mut buffer) {
                count += 1;
            }
        }
        count
    }

    /// Inner simulation for one scenario.
    fn scenario_rejects<R: Rng + ?Sized>(
        &self,
        control: &Beta<f64>,
        test: &Beta<f64>,
        rng: &mut R,
        buffer: &mut [f64],
    ) -> bool {
        for slot in buffer.iter_mut() {
            let c = control.sample(rng);
            let t = test.sample(rng);
            *slot = t - c;
        }
        interval_excludes_zero(credible_interval(buffer, self.alpha))
    }
}
