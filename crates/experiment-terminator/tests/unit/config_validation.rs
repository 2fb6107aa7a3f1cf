//! Tests for configuration validation.
//!
//! Builder methods reject invalid values with panics; fields set directly
//! are caught by `validate()` with a typed error.

use experiment_terminator::{AnalysisError, Config, ExperimentTerminator, ShapePolicy};

// =============================================================================
// SAMPLE COUNT VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "monte_carlo_samples must be > 0")]
fn samples_zero_panics() {
    let _ = ExperimentTerminator::new().samples(0);
}

#[test]
fn samples_one_valid() {
    let terminator = ExperimentTerminator::new().samples(1);
    assert_eq!(terminator.config().monte_carlo_samples, 1);
    assert!(terminator.config().validate().is_ok());
}

#[test]
fn samples_at_budget_valid() {
    // 2 * 10_000^2 == 200_000_000
    let config = Config::new().monte_carlo_samples(10_000);
    assert_eq!(config.simulation_draws(), 200_000_000);
    assert!(config.validate().is_ok());
}

#[test]
fn samples_over_budget_rejected() {
    let config = Config::new().monte_carlo_samples(10_001);
    assert!(matches!(
        config.validate(),
        Err(AnalysisError::SimulationBudgetExceeded {
            limit: 200_000_000,
            ..
        })
    ));
}

// =============================================================================
// SIGNIFICANCE LEVEL VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "significance_level must be in (0, 1)")]
fn alpha_zero_panics() {
    let _ = ExperimentTerminator::new().significance_level(0.0);
}

#[test]
#[should_panic(expected = "significance_level must be in (0, 1)")]
fn alpha_one_panics() {
    let _ = ExperimentTerminator::new().significance_level(1.0);
}

#[test]
fn alpha_typical_values_valid() {
    for alpha in [0.01, 0.05, 0.1, 0.2] {
        let terminator = ExperimentTerminator::new().significance_level(alpha);
        assert_eq!(terminator.config().significance_level, alpha);
    }
}

#[test]
fn alpha_nan_rejected_by_validate() {
    let mut config = Config::default();
    config.significance_level = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(AnalysisError::InvalidConfig(_))
    ));
}

// =============================================================================
// TERMINATION THRESHOLD VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "termination_lower_bound must be < termination_upper_bound")]
fn lower_above_upper_panics() {
    let _ = Config::new().termination_lower_bound(0.995);
}

#[test]
#[should_panic(expected = "termination_upper_bound must be in [0, 1]")]
fn upper_out_of_range_panics() {
    let _ = Config::new().termination_upper_bound(1.5);
}

#[test]
fn equal_bounds_rejected_by_validate() {
    let mut config = Config::default();
    config.termination_lower_bound = 0.5;
    config.termination_upper_bound = 0.5;
    assert!(config.validate().is_err());
}

#[test]
fn invalid_config_fails_analysis() {
    let mut config = Config::quick();
    config.termination_lower_bound = -0.1;
    let err = ExperimentTerminator::with_config(config)
        .analyze_counts(100, 100, 50, 50, 10, 10)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidConfig(_)));
}

// =============================================================================
// SHAPE POLICY VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "shape floor must be positive and finite")]
fn zero_floor_panics() {
    let _ = Config::new().shape_policy(ShapePolicy::Floor(0.0));
}

#[test]
fn infinite_floor_rejected_by_validate() {
    let mut config = Config::default();
    config.shape_policy = ShapePolicy::Floor(f64::INFINITY);
    assert!(config.validate().is_err());
}

// =============================================================================
// PRESETS
// =============================================================================

#[test]
fn presets_are_valid() {
    for config in [Config::quick(), Config::balanced(), Config::thorough()] {
        assert!(config.validate().is_ok());
    }
    assert_eq!(ExperimentTerminator::quick().config().monte_carlo_samples, 1_000);
    assert_eq!(
        ExperimentTerminator::thorough().config().monte_carlo_samples,
        10_000
    );
}
