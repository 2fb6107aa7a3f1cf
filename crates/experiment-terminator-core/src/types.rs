//! Input types: experiment arms and their observed counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ObservationFault};

/// One side of a two-arm experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// The reference arm (existing behaviour).
    Control,
    /// The arm receiving the treatment under evaluation.
    Test,
}

impl Arm {
    /// Lower-case label used in messages and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Arm::Control => "control",
            Arm::Test => "test",
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed progress of one arm of an experiment.
///
/// Counts are unsigned, so the only invariants left to check are
/// `planned_trials >= 1`, `completed_trials <= planned_trials` and
/// `successes <= completed_trials`. Construct through [`ArmObservation::new`]
/// to have them enforced, or call [`ArmObservation::validate`] on a value
/// built field by field (e.g. deserialized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmObservation {
    /// Number of trials the experiment plans to run in this arm.
    pub planned_trials: u64,
    /// Number of trials completed so far.
    pub completed_trials: u64,
    /// Number of successes observed among the completed trials.
    pub successes: u64,
}

impl ArmObservation {
    /// Create a validated observation for `arm`.
    pub fn new(
        arm: Arm,
        planned_trials: u64,
        completed_trials: u64,
        successes: u64,
    ) -> Result<Self, AnalysisError> {
        let obs = Self {
            planned_trials,
            completed_trials,
            successes,
        };
        obs.validate(arm)?;
        Ok(obs)
    }

    /// Check the count invariants, attributing any fault to `arm`.
    pub fn validate(&self, arm: Arm) -> Result<(), AnalysisError> {
        let fault = if self.planned_trials == 0 {
            Some(ObservationFault::NoPlannedTrials)
        } else if self.completed_trials > self.planned_trials {
            Some(ObservationFault::CompletedExceedsPlanned {
                completed: self.completed_trials,
                planned: self.planned_trials,
            })
        } else if self.successes > self.completed_trials {
            Some(ObservationFault::SuccessesExceedCompleted {
                successes: self.successes,
                completed: self.completed_trials,
            })
        } else {
            None
        };

        match fault {
            Some(fault) => Err(AnalysisError::InvalidObservation { arm, fault }),
            None => Ok(()),
        }
    }

    /// Trials still to run before the planned end.
    pub fn remaining_trials(&self) -> u64 {
        self.planned_trials - self.completed_trials
    }

    /// Failures observed among the completed trials.
    pub fn failures(&self) -> u64 {
        self.completed_trials - self.successes
    }

    /// Observed success rate `successes / completed_trials`.
    ///
    /// Returns NaN when no trials have completed; the posterior sampler
    /// rejects that case before the rate is ever reported.
    pub fn observed_rate(&self) -> f64 {
        self.successes as f64 / self.completed_trials as f64
    }

    /// True once every planned trial has completed.
    pub fn is_complete(&self) -> bool {
        self.completed_trials == self.planned_trials
    }
}
