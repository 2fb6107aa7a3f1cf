//! Error taxonomy for experiment analysis.

use crate::types::Arm;

/// Errors that can occur while analyzing an experiment.
///
/// Every failure is deterministic given the inputs and configuration, so
/// none of these are worth retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// An arm's counts violate their invariants. Raised before any sampling.
    #[error("invalid {arm} observation: {fault}")]
    InvalidObservation {
        /// Arm whose counts are invalid.
        arm: Arm,
        /// Which invariant was violated.
        fault: ObservationFault,
    },

    /// A Beta posterior has a non-positive shape parameter.
    ///
    /// Happens with zero successes or zero failures under
    /// `ShapePolicy::Reject`, and with no completed trials under any policy.
    #[error("degenerate Beta({alpha}, {beta}) posterior for {arm} arm: shape parameters must be positive")]
    DegenerateDistribution {
        /// Arm whose posterior is degenerate.
        arm: Arm,
        /// First shape parameter (successes).
        alpha: f64,
        /// Second shape parameter (failures).
        beta: f64,
    },

    /// Every paired posterior draw had a zero control rate, so no lift
    /// sample could be formed.
    #[error("relative lift undefined: all {draws} control draws were zero")]
    NumericDegeneracy {
        /// Number of paired draws examined.
        draws: usize,
    },

    /// A parameter inside the predictive simulation left its domain.
    #[error("simulation invariant violated: {0}")]
    InvariantViolation(String),

    /// The configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The requested simulation would exceed the configured draw budget.
    #[error("simulation needs {requested} predictive draws, limit is {limit}")]
    SimulationBudgetExceeded {
        /// Draws the configuration would require.
        requested: u64,
        /// Configured ceiling.
        limit: u64,
    },
}

/// The specific invariant an [`ArmObservation`](crate::types::ArmObservation)
/// violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ObservationFault {
    /// `planned_trials` is zero.
    #[error("planned trials must be at least 1")]
    NoPlannedTrials,

    /// More trials completed than planned.
    #[error("completed trials ({completed}) exceed planned trials ({planned})")]
    CompletedExceedsPlanned {
        /// Completed trials.
        completed: u64,
        /// Planned trials.
        planned: u64,
    },

    /// More successes than completed trials.
    #[error("successes ({successes}) exceed completed trials ({completed})")]
    SuccessesExceedCompleted {
        /// Observed successes.
        successes: u64,
        /// Completed trials.
        completed: u64,
    },
}
