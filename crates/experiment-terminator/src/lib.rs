//! # experiment-terminator
//!
//! Decide whether a running A/B experiment can be stopped early.
//!
//! From each arm's planned trials, completed trials and successes, the
//! analysis reports:
//! - Observed success rates of both arms
//! - Posterior relative lift of test over control
//! - Probability that test truly beats control
//! - Probability that the experiment will be significant at its planned end
//!
//! and classifies the experiment as terminable (no difference, or a
//! difference in a given direction) or not.
//!
//! ## Quick Start
//!
//! ```ignore
//! use experiment_terminator::{ExperimentTerminator, TerminationDecision};
//!
//! let analysis = ExperimentTerminator::quick()
//!     .seed(42)
//!     .analyze_counts(2000, 2000, 1000, 1000, 250, 270)?;
//!
//! println!("Lift: {:.2}%", analysis.result.expected_lift * 100.0);
//! match analysis.decision {
//!     TerminationDecision::Continue => println!("keep running"),
//!     decision => println!("{decision}"),
//! }
//! ```
//!
//! ## Cost
//!
//! The predictive stage draws `2 * N * N` Beta variates for N Monte Carlo
//! samples. [`Config::max_simulation_draws`] caps this, and analyses above
//! the cap fail before any sampling.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod terminator;

pub mod output;

pub use config::Config;
pub use terminator::ExperimentTerminator;

pub use experiment_terminator_core::{
    Analysis, AnalysisError, AnalysisResult, Arm, ArmObservation, DecisionThresholds, Direction,
    LiftSampleSet, ObservationFault, PredictiveEstimate, ShapePolicy, TerminationDecision,
};
