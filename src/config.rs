//! Configuration for adaptive staircases.

use crate::types::StaircaseRule;

/// Configuration options shared by every staircase built from it.
///
/// The intensity is whatever stimulus parameter the experiment adapts; for a
/// duration staircase it is the display time in seconds. The step size starts
/// at `initial_step_size` and is halved after every `reversals_to_halve_step`
/// reversals, never dropping below `final_step_size`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaircaseConfig {
    /// Up/down counting rule. Default: [`StaircaseRule::TwoUpOneDown`]
    /// (70.7% correct).
    pub rule: StaircaseRule,

    /// Intensity of the very first trial. Default: 0.6 (600 ms).
    pub initial_intensity: f64,

    /// Lower clamp for the adapted intensity. Default: 0.01.
    pub min_intensity: f64,

    /// Upper clamp for the adapted intensity. Default: 1.0.
    pub max_intensity: f64,

    /// Step size at the start of the session. Default: 0.05 (50 ms).
    pub initial_step_size: f64,

    /// Floor for the step size; halving never goes below this.
    /// Default: 0.011 (a single frame at 90 Hz).
    pub final_step_size: f64,

    /// Halve the step size after every this many reversals. Default: 4.
    pub reversals_to_halve_step: u32,

    /// Optional automatic completion policy.
    ///
    /// `None` (the default) means the engine never flags itself complete and
    /// the caller owns the stopping decision. See [`StoppingRule`].
    pub stopping: Option<StoppingRule>,
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            rule: StaircaseRule::TwoUpOneDown,
            initial_intensity: 0.6,
            min_intensity: 0.01,
            max_intensity: 1.0,
            initial_step_size: 0.05,
            final_step_size: 0.011,
            reversals_to_halve_step: 4,
            stopping: None,
        }
    }
}

impl StaircaseConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the up/down rule.
    pub fn rule(mut self, rule: StaircaseRule) -> Self {
        self.rule = rule;
        self
    }

    /// Set the intensity of the first trial.
    pub fn initial_intensity(mut self, intensity: f64) -> Self {
        assert!(intensity.is_finite(), "initial_intensity must be finite");
        self.initial_intensity = intensity;
        self
    }

    /// Set the intensity clamp bounds.
    pub fn intensity_bounds(mut self, min: f64, max: f64) -> Self {
        assert!(min < max, "min_intensity must be < max_intensity");
        self.min_intensity = min;
        self.max_intensity = max;
        self
    }

    /// Set the initial step size.
    pub fn initial_step_size(mut self, step: f64) -> Self {
        assert!(step > 0.0, "initial_step_size must be positive");
        self.initial_step_size = step;
        self
    }

    /// Set the step size floor.
    pub fn final_step_size(mut self, step: f64) -> Self {
        assert!(step > 0.0, "final_step_size must be positive");
        self.final_step_size = step;
        self
    }

    /// Set how many reversals trigger a step-size halving.
    pub fn reversals_to_halve_step(mut self, reversals: u32) -> Self {
        assert!(reversals >= 1, "reversals_to_halve_step must be >= 1");
        self.reversals_to_halve_step = reversals;
        self
    }

    /// Enable automatic completion with the given stopping rule.
    pub fn stopping(mut self, rule: StoppingRule) -> Self {
        self.stopping = Some(rule);
        self
    }

    /// Check if the configuration is valid.
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial_intensity.is_finite() {
            return Err("initial_intensity must be finite".to_string());
        }
        if self.min_intensity >= self.max_intensity {
            return Err("min_intensity must be < max_intensity".to_string());
        }
        if self.initial_intensity < self.min_intensity
            || self.initial_intensity > self.max_intensity
        {
            return Err("initial_intensity must be within [min_intensity, max_intensity]".to_string());
        }
        if self.initial_step_size <= 0.0 {
            return Err("initial_step_size must be positive".to_string());
        }
        if self.final_step_size <= 0.0 {
            return Err("final_step_size must be positive".to_string());
        }
        if self.final_step_size > self.initial_step_size {
            return Err("final_step_size must be <= initial_step_size".to_string());
        }
        if self.reversals_to_halve_step == 0 {
            return Err("reversals_to_halve_step must be >= 1".to_string());
        }
        if let Some(stopping) = &self.stopping {
            stopping.validate()?;
        }
        Ok(())
    }
}

/// Automatic completion policy for a single staircase.
///
/// The staircase flags itself complete when `max_trials` is reached, or once
/// `min_reversals` reversals have been recorded and a further
/// `trials_after_min_reversals` trials have run since the
/// `min_reversals`-th reversal.
///
/// All three values are required; there is no disabled-by-default sentinel.
/// A staircase without a stopping rule simply omits it
/// ([`StaircaseConfig::stopping`] stays `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingRule {
    /// Hard cap on the number of trials.
    pub max_trials: u32,

    /// Reversals required before the trailing-trials clause arms.
    pub min_reversals: u32,

    /// Trials to keep running after the `min_reversals`-th reversal.
    pub trials_after_min_reversals: u32,
}

impl StoppingRule {
    /// Create a stopping rule.
    ///
    /// A typical configuration is `StoppingRule::new(60, 4, 20)`: stop at 60
    /// trials, or 20 trials after the 4th reversal, whichever comes first.
    pub fn new(max_trials: u32, min_reversals: u32, trials_after_min_reversals: u32) -> Self {
        assert!(max_trials >= 1, "max_trials must be >= 1");
        assert!(min_reversals >= 1, "min_reversals must be >= 1");
        assert!(
            trials_after_min_reversals >= 1,
            "trials_after_min_reversals must be >= 1"
        );
        Self {
            max_trials,
            min_reversals,
            trials_after_min_reversals,
        }
    }

    /// Check if the stopping rule is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_trials == 0 {
            return Err("max_trials must be >= 1".to_string());
        }
        if self.min_reversals == 0 {
            return Err("min_reversals must be >= 1".to_string());
        }
        if self.trials_after_min_reversals == 0 {
            return Err("trials_after_min_reversals must be >= 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StaircaseConfig::default();
        assert_eq!(config.rule, StaircaseRule::TwoUpOneDown);
        assert_eq!(config.initial_intensity, 0.6);
        assert_eq!(config.min_intensity, 0.01);
        assert_eq!(config.max_intensity, 1.0);
        assert_eq!(config.initial_step_size, 0.05);
        assert_eq!(config.final_step_size, 0.011);
        assert_eq!(config.reversals_to_halve_step, 4);
        assert!(config.stopping.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = StaircaseConfig::new()
            .rule(StaircaseRule::OneUpThreeDown)
            .initial_intensity(0.3)
            .intensity_bounds(0.05, 0.8)
            .initial_step_size(0.04)
            .final_step_size(0.005)
            .reversals_to_halve_step(2)
            .stopping(StoppingRule::new(60, 4, 20));

        assert_eq!(config.rule, StaircaseRule::OneUpThreeDown);
        assert_eq!(config.initial_intensity, 0.3);
        assert_eq!(config.min_intensity, 0.05);
        assert_eq!(config.max_intensity, 0.8);
        assert_eq!(config.initial_step_size, 0.04);
        assert_eq!(config.final_step_size, 0.005);
        assert_eq!(config.reversals_to_halve_step, 2);
        assert_eq!(config.stopping, Some(StoppingRule::new(60, 4, 20)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_bounds() {
        let mut config = StaircaseConfig::default();
        config.min_intensity = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_initial_outside_bounds() {
        let mut config = StaircaseConfig::default();
        config.initial_intensity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_step_floor_above_initial() {
        let mut config = StaircaseConfig::default();
        config.final_step_size = 0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "min_intensity must be < max_intensity")]
    fn test_invalid_bounds_panic() {
        let _ = StaircaseConfig::new().intensity_bounds(1.0, 0.5);
    }

    #[test]
    #[should_panic(expected = "initial_step_size must be positive")]
    fn test_invalid_step_panic() {
        let _ = StaircaseConfig::new().initial_step_size(0.0);
    }

    #[test]
    #[should_panic(expected = "min_reversals must be >= 1")]
    fn test_invalid_stopping_rule_panic() {
        let _ = StoppingRule::new(60, 0, 20);
    }
}
