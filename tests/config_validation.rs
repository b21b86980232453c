//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected by the
//! builder methods with appropriate panic messages, and that `validate()`
//! catches inconsistent field combinations set directly.

use staircase::{StaircaseConfig, StoppingRule};

// =============================================================================
// INTENSITY BOUNDS
// =============================================================================

#[test]
#[should_panic(expected = "min_intensity must be < max_intensity")]
fn inverted_bounds_panic() {
    let _ = StaircaseConfig::new().intensity_bounds(1.0, 0.01);
}

#[test]
#[should_panic(expected = "min_intensity must be < max_intensity")]
fn equal_bounds_panic() {
    let _ = StaircaseConfig::new().intensity_bounds(0.5, 0.5);
}

#[test]
fn tight_bounds_valid() {
    let config = StaircaseConfig::new()
        .initial_intensity(0.5)
        .intensity_bounds(0.49, 0.51);
    assert!(config.validate().is_ok());
}

#[test]
#[should_panic(expected = "initial_intensity must be finite")]
fn nan_initial_intensity_panics() {
    let _ = StaircaseConfig::new().initial_intensity(f64::NAN);
}

#[test]
fn initial_outside_bounds_fails_validation() {
    let config = StaircaseConfig::new()
        .initial_intensity(0.9)
        .intensity_bounds(0.01, 0.5);
    assert!(config.validate().is_err());
}

// =============================================================================
// STEP SIZES
// =============================================================================

#[test]
#[should_panic(expected = "initial_step_size must be positive")]
fn zero_initial_step_panics() {
    let _ = StaircaseConfig::new().initial_step_size(0.0);
}

#[test]
#[should_panic(expected = "initial_step_size must be positive")]
fn negative_initial_step_panics() {
    let _ = StaircaseConfig::new().initial_step_size(-0.05);
}

#[test]
#[should_panic(expected = "final_step_size must be positive")]
fn zero_final_step_panics() {
    let _ = StaircaseConfig::new().final_step_size(0.0);
}

#[test]
fn final_step_above_initial_fails_validation() {
    let config = StaircaseConfig::new()
        .initial_step_size(0.01)
        .final_step_size(0.02);
    assert!(config.validate().is_err());
}

#[test]
fn equal_step_sizes_valid() {
    let config = StaircaseConfig::new()
        .initial_step_size(0.02)
        .final_step_size(0.02);
    assert!(config.validate().is_ok());
}

// =============================================================================
// STEP HALVING CADENCE
// =============================================================================

#[test]
#[should_panic(expected = "reversals_to_halve_step must be >= 1")]
fn zero_halving_cadence_panics() {
    let _ = StaircaseConfig::new().reversals_to_halve_step(0);
}

#[test]
fn halve_every_reversal_valid() {
    let config = StaircaseConfig::new().reversals_to_halve_step(1);
    assert!(config.validate().is_ok());
}

// =============================================================================
// STOPPING RULE
// =============================================================================

#[test]
#[should_panic(expected = "max_trials must be >= 1")]
fn zero_max_trials_panics() {
    let _ = StoppingRule::new(0, 4, 20);
}

#[test]
#[should_panic(expected = "min_reversals must be >= 1")]
fn zero_min_reversals_panics() {
    let _ = StoppingRule::new(60, 0, 20);
}

#[test]
#[should_panic(expected = "trials_after_min_reversals must be >= 1")]
fn zero_trailing_buffer_panics() {
    let _ = StoppingRule::new(60, 4, 0);
}

#[test]
fn typical_stopping_rule_valid() {
    let config = StaircaseConfig::new().stopping(StoppingRule::new(60, 4, 20));
    assert!(config.validate().is_ok());
}

#[test]
fn default_config_is_valid() {
    assert!(StaircaseConfig::default().validate().is_ok());
}
