//! End-to-end analyses of representative experiments.

use experiment_terminator::{Direction, ExperimentTerminator, TerminationDecision};

fn terminator(seed: u64) -> ExperimentTerminator {
    ExperimentTerminator::quick().seed(seed)
}

// =============================================================================
// MID-EXPERIMENT, OUTCOME STILL OPEN
// =============================================================================

#[test]
fn half_complete_small_lift_continues() {
    let analysis = terminator(42)
        .analyze_counts(2000, 2000, 1000, 1000, 250, 270)
        .unwrap();
    let result = &analysis.result;

    assert_eq!(result.control_rate, 0.25);
    assert_eq!(result.test_rate, 0.27);
    assert!(
        result.expected_lift > 0.03 && result.expected_lift < 0.13,
        "expected lift near 0.08, got {}",
        result.expected_lift
    );
    assert!(
        result.prob_test_beats_control > 0.7,
        "P(test > control) = {}",
        result.prob_test_beats_control
    );
    assert!(
        result.prob_significance_at_end > 0.05 && result.prob_significance_at_end < 0.95,
        "P(significant at end) = {}",
        result.prob_significance_at_end
    );
    assert_eq!(analysis.decision, TerminationDecision::Continue);
    assert!(!analysis.is_terminable());
    assert_eq!(result.lift_samples.len(), 1000);
}

// =============================================================================
// COMPLETE EXPERIMENT WITH A DECISIVE WINNER
// =============================================================================

#[test]
fn complete_decisive_test_win_terminates() {
    let analysis = terminator(7)
        .analyze_counts(500, 500, 500, 500, 50, 450)
        .unwrap();

    assert_eq!(analysis.result.prob_significance_at_end, 1.0);
    assert_eq!(analysis.result.prob_test_beats_control, 1.0);
    assert_eq!(
        analysis.decision,
        TerminationDecision::TerminateDifference {
            direction: Direction::TestSuperior
        }
    );
}

#[test]
fn complete_decisive_control_win_terminates() {
    let analysis = terminator(7)
        .analyze_counts(500, 500, 500, 500, 450, 50)
        .unwrap();

    assert_eq!(analysis.result.prob_significance_at_end, 1.0);
    assert_eq!(analysis.result.prob_test_beats_control, 0.0);
    assert!(analysis.result.expected_lift < -0.8);
    assert_eq!(
        analysis.decision,
        TerminationDecision::TerminateDifference {
            direction: Direction::ControlSuperior
        }
    );
}

// =============================================================================
// NEARLY COMPLETE, IDENTICAL ARMS
// =============================================================================

#[test]
fn nearly_complete_identical_arms_terminate_without_difference() {
    let analysis = terminator(3)
        .analyze_counts(10_000, 10_000, 9_000, 9_000, 900, 900)
        .unwrap();
    let result = &analysis.result;

    assert!(
        result.expected_lift.abs() < 0.02,
        "expected lift near 0, got {}",
        result.expected_lift
    );
    assert!(
        (result.prob_test_beats_control - 0.5).abs() < 0.1,
        "P(test > control) = {}",
        result.prob_test_beats_control
    );
    assert!(result.prob_significance_at_end < 0.01);
    assert_eq!(analysis.decision, TerminationDecision::TerminateNoDifference);
}

// =============================================================================
// UNEVEN ARMS
// =============================================================================

#[test]
fn unequal_arm_sizes_are_supported() {
    let analysis = terminator(11)
        .analyze_counts(3000, 1000, 1500, 400, 150, 60)
        .unwrap();

    assert_eq!(analysis.result.control_rate, 0.1);
    assert_eq!(analysis.result.test_rate, 0.15);
    assert!(analysis.result.expected_lift > 0.0);
    assert!((0.0..=1.0).contains(&analysis.result.prob_significance_at_end));
}
