//! Termination rule applied to the predictive probability.
//!
//! With `p = P(significant at planned end)` and `q = P(test > control)`:
//!
//! | condition          | decision                                   |
//! |--------------------|--------------------------------------------|
//! | `p < lower`        | terminate, no difference expected          |
//! | `p > upper`        | terminate, test superior if `q > midpoint` |
//! | otherwise          | continue                                   |
//!
//! The rule is stateless: no hysteresis across calls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DIRECTION_MIDPOINT, DEFAULT_TERMINATION_LOWER_BOUND, DEFAULT_TERMINATION_UPPER_BOUND,
};

/// Which arm a terminable difference favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Test outperforms control.
    TestSuperior,
    /// Control outperforms test.
    ControlSuperior,
}

/// Outcome of the termination rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationDecision {
    /// Significance at the planned end is nearly impossible.
    TerminateNoDifference,
    /// Significance at the planned end is nearly certain.
    TerminateDifference {
        /// Which arm is expected to win.
        direction: Direction,
    },
    /// The eventual outcome is still open.
    Continue,
}

impl TerminationDecision {
    /// True for either terminate classification.
    pub fn is_terminable(&self) -> bool {
        !matches!(self, TerminationDecision::Continue)
    }

    /// Short conclusion for terminable outcomes: "no difference",
    /// "test superior" or "control superior".
    pub fn conclusion(&self) -> Option<&'static str> {
        match self {
            TerminationDecision::TerminateNoDifference => Some("no difference"),
            TerminationDecision::TerminateDifference {
                direction: Direction::TestSuperior,
            } => Some("test superior"),
            TerminationDecision::TerminateDifference {
                direction: Direction::ControlSuperior,
            } => Some("control superior"),
            TerminationDecision::Continue => None,
        }
    }
}

impl fmt::Display for TerminationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationDecision::TerminateNoDifference => write!(
                f,
                "Experiment can be terminated. No difference between test and control will be found."
            ),
            TerminationDecision::TerminateDifference {
                direction: Direction::TestSuperior,
            } => write!(f, "Experiment can be terminated. Test is superior to control."),
            TerminationDecision::TerminateDifference {
                direction: Direction::ControlSuperior,
            } => write!(f, "Experiment can be terminated. Control is superior to test."),
            TerminationDecision::Continue => write!(f, "Experiment should not be terminated."),
        }
    }
}

/// Thresholds of the termination rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Terminate with no difference below this predictive probability.
    pub lower: f64,
    /// Terminate with a difference above this predictive probability.
    pub upper: f64,
    /// P(test > control) above which the difference favours test.
    pub direction_midpoint: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_TERMINATION_LOWER_BOUND,
            upper: DEFAULT_TERMINATION_UPPER_BOUND,
            direction_midpoint: DEFAULT_DIRECTION_MIDPOINT,
        }
    }
}

impl DecisionThresholds {
    /// Create thresholds, checking `0 <= lower < upper <= 1` and a midpoint
    /// in [0, 1].
    pub fn new(lower: f64, upper: f64, direction_midpoint: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&lower) && (0.0..=1.0).contains(&upper),
            "termination bounds must be in [0, 1]"
        );
        assert!(lower < upper, "lower termination bound must be < upper bound");
        assert!(
            (0.0..=1.0).contains(&direction_midpoint),
            "direction midpoint must be in [0, 1]"
        );
        Self {
            lower,
            upper,
            direction_midpoint,
        }
    }

    /// Classify from `p = P(significant at end)` and `q = P(test > control)`.
    pub fn classify(
        &self,
        prob_significance_at_end: f64,
        prob_test_beats_control: f64,
    ) -> TerminationDecision {
        if prob_significance_at_end < self.lower {
            TerminationDecision::TerminateNoDifference
        } else if prob_significance_at_end > self.upper {
            let direction = if prob_test_beats_control > self.direction_midpoint {
                Direction::TestSuperior
            } else {
                Direction::ControlSuperior
            };
            TerminationDecision::TerminateDifference { direction }
        } else {
            TerminationDecision::Continue
        }
    }
}
