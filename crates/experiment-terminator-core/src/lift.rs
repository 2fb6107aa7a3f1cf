//! Relative lift of test over control from paired posterior draws.
//!
//! Draw `i` of the control set and draw `i` of the test set form one
//! hypothetical world, with lift `(test[i] - control[i]) / control[i]`.
//!
//! A control draw of exactly zero leaves the lift undefined. The Beta
//! posterior puts no mass there, but floating-point draws from very skewed
//! shapes (e.g. under `ShapePolicy::Floor`) can underflow to zero. Such draws
//! are dropped and counted, so they never enter the mean or the probability
//! as a fabricated value.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::posterior::PosteriorSampleSet;
use crate::statistics::compute_quantile_sorted;
use crate::types::Arm;

/// Relative lift samples, one per retained pair of posterior draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftSampleSet {
    values: Vec<f64>,
    /// Pairs dropped because the lift was not finite.
    pub excluded: usize,
}

impl LiftSampleSet {
    /// The lift values, in draw order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of retained lift samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no lift sample was retained.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of the retained lifts.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Fraction of retained lifts that are `>= 0`.
    pub fn fraction_non_negative(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let hits = self.values.iter().filter(|&&l| l >= 0.0).count();
        hits as f64 / self.values.len() as f64
    }

    /// Median of the retained lifts.
    ///
    /// Robust to the extreme lifts produced by near-zero control draws,
    /// which can swamp [`mean`](Self::mean).
    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let mut sorted = self.values.clone();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));
        compute_quantile_sorted(&sorted, 0.5)
    }
}

/// Lift statistics derived from one pair of posterior sample sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftSummary {
    /// Per-draw relative lifts.
    pub samples: LiftSampleSet,
    /// Posterior mean lift.
    pub expected_lift: f64,
    /// P(test rate >= control rate), estimated as the fraction of
    /// non-negative lifts.
    pub prob_test_beats_control: f64,
}

/// Compute relative lift statistics from paired control/test draws.
///
/// # Errors
///
/// Returns [`AnalysisError::NumericDegeneracy`] if every pair was dropped.
///
/// # Panics
///
/// Panics if the sets differ in length or are not labelled control and test.
pub fn estimate_lift(
    control: &PosteriorSampleSet,
    test: &PosteriorSampleSet,
) -> Result<LiftSummary, AnalysisError> {
    assert_eq!(control.arm, Arm::Control, "first sample set must be control");
    assert_eq!(test.arm, Arm::Test, "second sample set must be test");
    assert_eq!(
        control.len(),
        test.len(),
        "posterior sample sets must be paired"
    );

    let draws = control.len();
    let mut values = Vec::with_capacity(draws);
    for (&c, &t) in control.draws().iter().zip(test.draws()) {
        if c == 0.0 {
            continue;
        }
        let lift = (t - c) / c;
        if lift.is_finite() {
            values.push(lift);
        }
    }

    let samples = LiftSampleSet {
        excluded: draws - values.len(),
        values,
    };
    if samples.is_empty() {
        return Err(AnalysisError::NumericDegeneracy { draws });
    }
    if samples.excluded > 0 {
        tracing::warn!(
            excluded = samples.excluded,
            draws,
            median_lift = samples.median(),
            "dropped posterior draws with zero control rate from lift"
        );
    }

    Ok(LiftSummary {
        expected_lift: samples.mean(),
        prob_test_beats_control: samples.fraction_non_negative(),
        samples,
    })
}
