//! Result types produced by an analysis call.

use serde::{Deserialize, Serialize};

use crate::decision::TerminationDecision;
use crate::lift::{LiftSampleSet, LiftSummary};
use crate::predictive::PredictiveEstimate;
use crate::types::ArmObservation;

/// Summary statistics of one analysis.
///
/// All probability fields lie in [0, 1], and `expected_lift` is the mean of
/// `lift_samples`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Observed control success rate `successes / completed_trials`.
    pub control_rate: f64,
    /// Observed test success rate `successes / completed_trials`.
    pub test_rate: f64,
    /// Posterior mean relative lift of test over control.
    pub expected_lift: f64,
    /// Posterior probability that the test rate is at least the control rate.
    pub prob_test_beats_control: f64,
    /// Posterior-predictive probability that the credible interval on
    /// `test - control` excludes zero at the planned end.
    pub prob_significance_at_end: f64,
    /// Posterior lift samples, e.g. for a histogram.
    pub lift_samples: LiftSampleSet,
}

impl AnalysisResult {
    /// Assemble the result from the observations and the stage outputs.
    pub fn from_stages(
        control: &ArmObservation,
        test: &ArmObservation,
        lift: LiftSummary,
        predictive: &PredictiveEstimate,
    ) -> Self {
        Self {
            control_rate: control.observed_rate(),
            test_rate: test.observed_rate(),
            expected_lift: lift.expected_lift,
            prob_test_beats_control: lift.prob_test_beats_control,
            prob_significance_at_end: predictive.prob_reject,
            lift_samples: lift.samples,
        }
    }
}

/// Complete output of one analysis call: statistics, decision and the
/// information needed to replay it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Control arm counts the analysis ran on.
    pub control: ArmObservation,
    /// Test arm counts the analysis ran on.
    pub test: ArmObservation,
    /// Summary statistics.
    pub result: AnalysisResult,
    /// Termination classification.
    pub decision: TerminationDecision,
    /// Monte Carlo sample count N used at both simulation levels.
    pub samples: usize,
    /// Seed of the RNG that drove the analysis, when the analysis seeded
    /// its own generator.
    pub seed: Option<u64>,
    /// Wall-clock duration of the analysis in seconds.
    pub elapsed_secs: f64,
}

impl Analysis {
    /// Shorthand for `self.decision.is_terminable()`.
    pub fn is_terminable(&self) -> bool {
        self.decision.is_terminable()
    }
}
