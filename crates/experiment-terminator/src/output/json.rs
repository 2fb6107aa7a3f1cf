//! JSON serialization for experiment analyses.

use experiment_terminator_core::Analysis;

/// Serialize an Analysis to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails. Non-finite floats serialize as
/// `null` rather than failing.
pub fn to_json(analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string(analysis)
}

/// Serialize an Analysis to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty(analysis: &Analysis) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use experiment_terminator_core::{
        estimate_lift, AnalysisResult, Arm, ArmObservation, Direction, PosteriorSampleSet,
        TerminationDecision,
    };

    fn make_analysis(decision: TerminationDecision) -> Analysis {
        let lift = estimate_lift(
            &PosteriorSampleSet::from_draws(Arm::Control, vec![0.1, 0.1]),
            &PosteriorSampleSet::from_draws(Arm::Test, vec![0.9, 0.8]),
        )
        .unwrap();
        Analysis {
            control: ArmObservation::new(Arm::Control, 10, 10, 1).unwrap(),
            test: ArmObservation::new(Arm::Test, 10, 10, 9).unwrap(),
            result: AnalysisResult {
                control_rate: 0.1,
                test_rate: 0.9,
                expected_lift: lift.expected_lift,
                prob_test_beats_control: lift.prob_test_beats_control,
                prob_significance_at_end: 1.0,
                lift_samples: lift.samples,
            },
            decision,
            samples: 2,
            seed: Some(7),
            elapsed_secs: 0.01,
        }
    }

    #[test]
    fn test_json_fields() {
        let analysis = make_analysis(TerminationDecision::TerminateDifference {
            direction: Direction::TestSuperior,
        });
        let json = to_json(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["control_rate"], 0.1);
        assert_eq!(value["result"]["prob_significance_at_end"], 1.0);
        assert_eq!(value["samples"], 2);
        assert_eq!(value["seed"], 7);
        assert_eq!(value["test"]["successes"], 9);
        assert_eq!(
            value["decision"]["TerminateDifference"]["direction"],
            "TestSuperior"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let analysis = make_analysis(TerminationDecision::Continue);
        let json = to_json_pretty(&analysis).unwrap();
        assert!(json.contains('\n'));

        let parsed: Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.decision, TerminationDecision::Continue);
        assert_eq!(parsed.result.lift_samples.len(), 2);
    }

    #[test]
    fn test_unit_decision_serializes_as_string() {
        let json = to_json(&make_analysis(TerminationDecision::TerminateNoDifference)).unwrap();
        assert!(json.contains(r#""decision":"TerminateNoDifference""#));
    }
}
