//! Main `ExperimentTerminator` entry point and builder.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use experiment_terminator_core::{
    estimate_lift, Analysis, AnalysisError, AnalysisResult, Arm, ArmObservation,
    PosteriorSampler, PredictiveRejectionEstimator,
};

use crate::config::Config;

/// Main entry point for experiment termination analysis.
///
/// Runs the posterior sampler, the lift estimator, the predictive
/// simulation and the decision rule in order.
///
/// # Example
///
/// ```ignore
/// use experiment_terminator::{ArmObservation, Arm, ExperimentTerminator};
///
/// let control = ArmObservation::new(Arm::Control, 2000, 1000, 250)?;
/// let test = ArmObservation::new(Arm::Test, 2000, 1000, 270)?;
///
/// let analysis = ExperimentTerminator::new().seed(42).analyze(&control, &test)?;
/// println!("{}", analysis.decision);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentTerminator {
    config: Config,
}

impl ExperimentTerminator {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Create with the quick preset (N = 1,000).
    pub fn quick() -> Self {
        Self::with_config(Config::quick())
    }

    /// Create with the thorough preset (N = 10,000).
    pub fn thorough() -> Self {
        Self::with_config(Config::thorough())
    }

    /// Set the Monte Carlo sample count N.
    pub fn samples(mut self, n: usize) -> Self {
        self.config = self.config.monte_carlo_samples(n);
        self
    }

    /// Set the significance level alpha.
    pub fn significance_level(mut self, alpha: f64) -> Self {
        self.config = self.config.significance_level(alpha);
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.seed(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze an experiment from the six raw counts.
    ///
    /// The counts are validated before any sampling.
    #[allow(clippy::too_many_arguments)]
    pub fn analyze_counts(
        &self,
        planned_control: u64,
        planned_test: u64,
        completed_control: u64,
        completed_test: u64,
        successes_control: u64,
        successes_test: u64,
    ) -> Result<Analysis, AnalysisError> {
        let control = ArmObservation::new(
            Arm::Control,
            planned_control,
            completed_control,
            successes_control,
        )?;
        let test = ArmObservation::new(Arm::Test, planned_test, completed_test, successes_test)?;
        self.analyze(&control, &test)
    }

    /// Analyze an experiment.
    ///
    /// Uses the configured seed, or draws a fresh one that is reported in
    /// [`Analysis::seed`] so the run can be replayed.
    pub fn analyze(
        &self,
        control: &ArmObservation,
        test: &ArmObservation,
    ) -> Result<Analysis, AnalysisError> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut analysis = self.analyze_with_rng(control, test, &mut rng)?;
        analysis.seed = Some(seed);
        Ok(analysis)
    }

    /// Analyze an experiment, drawing all randomness from `rng`.
    ///
    /// The configured seed is ignored and [`Analysis::seed`] is `None`; the
    /// caller owns reproducibility through `rng`.
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        control: &ArmObservation,
        test: &ArmObservation,
        rng: &mut R,
    ) -> Result<Analysis, AnalysisError> {
        let start = Instant::now();

        control.validate(Arm::Control)?;
        test.validate(Arm::Test)?;
        self.config.validate()?;

        let n = self.config.monte_carlo_samples;
        tracing::debug!(
            samples = n,
            alpha = self.config.significance_level,
            parallel = experiment_terminator_core::PARALLEL,
            control_remaining = control.remaining_trials(),
            test_remaining = test.remaining_trials(),
            "starting experiment analysis"
        );

        // Stage 1: current posteriors
        let sampler = PosteriorSampler::new(n, self.config.shape_policy);
        let control_posterior = sampler.sample(Arm::Control, control, rng)?;
        let test_posterior = sampler.sample(Arm::Test, test, rng)?;

        // Stage 2: lift
        let lift = estimate_lift(&control_posterior, &test_posterior)?;
        tracing::debug!(
            expected_lift = lift.expected_lift,
            prob_test_beats_control = lift.prob_test_beats_control,
            "lift estimated"
        );

        // Stage 3: posterior-predictive simulation
        let predictive = PredictiveRejectionEstimator::new(n, self.config.significance_level)
            .estimate(control, test, &control_posterior, &test_posterior, rng)?;

        // Stage 4: decision
        let result = AnalysisResult::from_stages(control, test, lift, &predictive);
        let decision = self
            .config
            .thresholds()
            .classify(result.prob_significance_at_end, result.prob_test_beats_control);

        let elapsed_secs = start.elapsed().as_secs_f64();
        tracing::info!(
            prob_significance_at_end = result.prob_significance_at_end,
            prob_test_beats_control = result.prob_test_beats_control,
            ?decision,
            elapsed_secs,
            "experiment analysis complete"
        );

        Ok(Analysis {
            control: *control,
            test: *test,
            result,
            decision,
            samples: n,
            seed: None,
            elapsed_secs,
        })
    }
}
