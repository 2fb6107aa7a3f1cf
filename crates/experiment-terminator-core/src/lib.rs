//! Core statistics for deciding whether a running A/B experiment can stop.
//!
//! Given each arm's planned trials, completed trials and successes, the
//! engine estimates:
//!
//! - the posterior relative lift of test over control,
//! - the probability that test truly beats control,
//! - the posterior-predictive probability that the experiment will be
//!   significant once every planned trial has run,
//!
//! and classifies the experiment as terminable or not.
//!
//! # Pipeline
//!
//! ```text
//! ArmObservation ─► PosteriorSampler ─► LiftEstimator ──────────────┐
//!                          │                                        ▼
//!                          └──────► PredictiveRejectionEstimator ─► DecisionThresholds
//! ```
//!
//! # Features
//!
//! - `parallel` (default): Run the outer predictive scenarios on a rayon pool
//!
//! # Usage
//!
//! This crate is typically used through `experiment-terminator`, which adds
//! configuration, seeding, logging and output formatting.
//!
//! ```ignore
//! use experiment_terminator_core::{
//!     lift::estimate_lift,
//!     posterior::{PosteriorSampler, ShapePolicy},
//!     predictive::PredictiveRejectionEstimator,
//!     types::{Arm, ArmObservation},
//! };
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod decision;
pub mod error;
pub mod lift;
pub mod posterior;
pub mod predictive;
pub mod result;
pub mod statistics;
pub mod types;

// Re-export commonly used items at crate root
pub use decision::{DecisionThresholds, Direction, TerminationDecision};
pub use error::{AnalysisError, ObservationFault};
pub use lift::{estimate_lift, LiftSampleSet, LiftSummary};
pub use posterior::{PosteriorSampleSet, PosteriorSampler, ShapePolicy};
pub use predictive::{PredictiveEstimate, PredictiveRejectionEstimator};
pub use result::{Analysis, AnalysisResult};
pub use types::{Arm, ArmObservation};

/// Whether this build runs the predictive outer loop on rayon.
pub const PARALLEL: bool = cfg!(feature = "parallel");
