//! Statistical properties of the analysis: bounds, symmetry, monotonicity
//! and reproducibility.

use proptest::prelude::*;

use experiment_terminator::{
    AnalysisError, Arm, Config, ExperimentTerminator, ObservationFault, ShapePolicy,
};

// =============================================================================
// SYMMETRY
// =============================================================================

#[test]
fn swapping_arms_mirrors_probabilities() {
    let terminator = ExperimentTerminator::quick().seed(2024);
    let forward = terminator
        .analyze_counts(2000, 2000, 1000, 1000, 250, 270)
        .unwrap();
    let swapped = terminator
        .analyze_counts(2000, 2000, 1000, 1000, 270, 250)
        .unwrap();

    let q_sum =
        forward.result.prob_test_beats_control + swapped.result.prob_test_beats_control;
    assert!(
        (q_sum - 1.0).abs() < 0.06,
        "q + q' = {} (q = {}, q' = {})",
        q_sum,
        forward.result.prob_test_beats_control,
        swapped.result.prob_test_beats_control
    );

    let p_diff =
        forward.result.prob_significance_at_end - swapped.result.prob_significance_at_end;
    assert!(p_diff.abs() < 0.1, "p - p' = {}", p_diff);

    assert_eq!(forward.result.control_rate, swapped.result.test_rate);
    assert_eq!(forward.result.test_rate, swapped.result.control_rate);
}

// =============================================================================
// MONOTONICITY
// =============================================================================

#[test]
fn more_test_successes_raise_lift_and_win_probability() {
    let terminator = ExperimentTerminator::quick().seed(99);
    let low = terminator
        .analyze_counts(2000, 2000, 1000, 1000, 250, 270)
        .unwrap();
    let high = terminator
        .analyze_counts(2000, 2000, 1000, 1000, 250, 300)
        .unwrap();

    assert!(high.result.expected_lift > low.result.expected_lift);
    assert!(high.result.prob_test_beats_control >= low.result.prob_test_beats_control);
}

// =============================================================================
// REPRODUCIBILITY
// =============================================================================

#[test]
fn same_seed_gives_identical_analysis() {
    let terminator = ExperimentTerminator::new().samples(300).seed(12345);
    let first = terminator
        .analyze_counts(5000, 5000, 2000, 2100, 400, 460)
        .unwrap();
    let second = terminator
        .analyze_counts(5000, 5000, 2000, 2100, 400, 460)
        .unwrap();

    assert_eq!(first.result, second.result);
    assert_eq!(first.decision, second.decision);
    assert_eq!(first.seed, Some(12345));
    assert_eq!(first.seed, second.seed);
    assert_eq!(first.samples, second.samples);
}

#[test]
fn different_seeds_give_different_draws() {
    let a = ExperimentTerminator::new()
        .samples(200)
        .seed(1)
        .analyze_counts(5000, 5000, 2000, 2000, 400, 420)
        .unwrap();
    let b = ExperimentTerminator::new()
        .samples(200)
        .seed(2)
        .analyze_counts(5000, 5000, 2000, 2000, 400, 420)
        .unwrap();

    assert_ne!(a.result.lift_samples, b.result.lift_samples);
}

// =============================================================================
// INVALID INPUT
// =============================================================================

#[test]
fn zero_planned_trials_rejected() {
    let err = ExperimentTerminator::quick()
        .analyze_counts(0, 100, 0, 50, 0, 10)
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidObservation {
            arm: Arm::Control,
            fault: ObservationFault::NoPlannedTrials,
        }
    );
}

#[test]
fn successes_above_completed_rejected() {
    let err = ExperimentTerminator::quick()
        .analyze_counts(100, 100, 50, 50, 10, 60)
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidObservation {
            arm: Arm::Test,
            fault: ObservationFault::SuccessesExceedCompleted {
                successes: 60,
                completed: 50,
            },
        }
    );
}

#[test]
fn no_completed_trials_is_degenerate_under_any_policy() {
    for policy in [ShapePolicy::Reject, ShapePolicy::Floor(1e-3)] {
        let config = Config::quick().shape_policy(policy);
        let err = ExperimentTerminator::with_config(config)
            .analyze_counts(100, 100, 0, 50, 0, 10)
            .unwrap_err();
        assert!(
            matches!(
                err,
                AnalysisError::DegenerateDistribution {
                    arm: Arm::Control,
                    ..
                }
            ),
            "{:?} gave {:?}",
            policy,
            err
        );
    }
}

#[test]
fn zero_successes_rejected_by_default() {
    let err = ExperimentTerminator::quick()
        .analyze_counts(1000, 1000, 500, 500, 10, 0)
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::DegenerateDistribution {
            arm: Arm::Test,
            alpha: 0.0,
            beta: 500.0,
        }
    );
}

#[test]
fn zero_successes_allowed_with_shape_floor() {
    let config = Config::new()
        .monte_carlo_samples(500)
        .shape_policy(ShapePolicy::Floor(0.5))
        .seed(5);
    let analysis = ExperimentTerminator::with_config(config)
        .analyze_counts(1000, 1000, 500, 500, 40, 0)
        .unwrap();

    assert_eq!(analysis.result.test_rate, 0.0);
    assert!(analysis.result.expected_lift < 0.0);
    assert!(analysis.result.prob_test_beats_control < 0.01);
}

// =============================================================================
// PROBABILITY BOUNDS
// =============================================================================

fn arm_counts() -> impl Strategy<Value = (u64, u64, u64)> {
    (2u64..=200)
        .prop_flat_map(|completed| (Just(completed), 1..completed, 0u64..=300))
        .prop_map(|(completed, successes, extra)| (completed + extra, completed, successes))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn probabilities_stay_in_unit_interval(
        control in arm_counts(),
        test in arm_counts(),
        samples in 1usize..=30,
        seed in any::<u64>(),
    ) {
        let analysis = ExperimentTerminator::new()
            .samples(samples)
            .seed(seed)
            .analyze_counts(control.0, test.0, control.1, test.1, control.2, test.2)
            .unwrap();
        let result = &analysis.result;

        prop_assert!((0.0..=1.0).contains(&result.prob_test_beats_control));
        prop_assert!((0.0..=1.0).contains(&result.prob_significance_at_end));
        prop_assert!(result.expected_lift.is_finite());
        prop_assert!(result.expected_lift >= -1.0);
        prop_assert_eq!(result.lift_samples.len() + result.lift_samples.excluded, samples);
    }
}
