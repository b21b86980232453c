//! The per-condition staircase state machine.

use crate::config::StaircaseConfig;
use crate::error::StaircaseError;
use crate::summary::{StaircaseSnapshot, StaircaseSummary};

/// One adaptive staircase.
///
/// The engine is driven by [`process_response`](Self::process_response), once
/// per completed trial. Each call updates the run-length counters, detects
/// direction reversals, adjusts intensity and step size, clamps to the
/// configured bounds, and returns the intensity for the next trial.
///
/// All state is owned by the engine; callers observe it only through the
/// query methods, which hand out values or immutable slice views.
///
/// # Example
///
/// ```
/// use staircase::{StaircaseConfig, StaircaseEngine};
///
/// let mut engine = StaircaseEngine::new(StaircaseConfig::default());
/// engine.process_response(true).unwrap();
/// engine.process_response(true).unwrap(); // two correct -> step down
/// assert_eq!(engine.trial_count(), 2);
/// assert!(engine.current_intensity() < 0.6);
/// ```
#[derive(Debug, Clone)]
pub struct StaircaseEngine {
    config: StaircaseConfig,

    intensity: f64,
    step_size: f64,
    trial_count: u32,
    reversal_count: u32,
    consecutive_correct: u32,
    consecutive_incorrect: u32,
    last_direction_was_up: bool,
    has_had_first_reversal: bool,
    is_complete: bool,

    // Histories grow by one entry per trial (intensity recorded pre-update)
    // and one entry per detected reversal.
    intensity_history: Vec<f64>,
    response_history: Vec<bool>,
    reversal_intensities: Vec<f64>,
    reversal_trials: Vec<u32>,
}

impl StaircaseEngine {
    /// Create an engine initialized from the given configuration.
    pub fn new(config: StaircaseConfig) -> Self {
        tracing::debug!(
            rule = ?config.rule,
            initial = config.initial_intensity,
            step = config.initial_step_size,
            "staircase initialized"
        );
        Self {
            intensity: config.initial_intensity,
            step_size: config.initial_step_size,
            trial_count: 0,
            reversal_count: 0,
            consecutive_correct: 0,
            consecutive_incorrect: 0,
            last_direction_was_up: false,
            has_had_first_reversal: false,
            is_complete: false,
            intensity_history: Vec::new(),
            response_history: Vec::new(),
            reversal_intensities: Vec::new(),
            reversal_trials: Vec::new(),
            config,
        }
    }

    /// Process one trial's response and return the next trial's intensity.
    ///
    /// On a staircase already flagged complete this is a no-op that returns
    /// the current intensity unchanged (a warning is logged; it is not an
    /// error).
    ///
    /// # Errors
    ///
    /// [`StaircaseError::InvalidState`] if the stopping-rule evaluation finds
    /// fewer recorded reversals than its own gate requires. This indicates
    /// corrupted internal bookkeeping and cannot occur through this API.
    pub fn process_response(&mut self, correct: bool) -> Result<f64, StaircaseError> {
        if self.is_complete {
            tracing::warn!(
                trials = self.trial_count,
                "response ignored: staircase is already complete"
            );
            return Ok(self.intensity);
        }

        // Record the trial before any adjustment.
        self.trial_count += 1;
        self.intensity_history.push(self.intensity);
        self.response_history.push(correct);

        tracing::debug!(
            trial = self.trial_count,
            correct,
            intensity = self.intensity,
            "response recorded"
        );

        if correct {
            self.consecutive_correct += 1;
            self.consecutive_incorrect = 0;
        } else {
            self.consecutive_incorrect += 1;
            self.consecutive_correct = 0;
        }

        // Both directions are evaluated independently; the run-length
        // counters are mutually exclusive, so at most one can fire.
        let should_go_up = self.config.rule.should_increase(self.consecutive_incorrect);
        let should_go_down = self.config.rule.should_decrease(self.consecutive_correct);

        let is_reversal = self.check_for_reversal(should_go_up, should_go_down);

        if should_go_up {
            self.intensity += self.step_size;
            self.last_direction_was_up = true;
            self.consecutive_correct = 0;
            self.consecutive_incorrect = 0;
        } else if should_go_down {
            self.intensity -= self.step_size;
            self.last_direction_was_up = false;
            self.consecutive_correct = 0;
            self.consecutive_incorrect = 0;
        }

        if is_reversal {
            self.reversal_count += 1;
            self.reversal_intensities.push(self.intensity);
            self.reversal_trials.push(self.trial_count);
            self.has_had_first_reversal = true;

            tracing::debug!(
                reversal = self.reversal_count,
                trial = self.trial_count,
                intensity = self.intensity,
                "reversal"
            );

            if self.reversal_count % self.config.reversals_to_halve_step == 0 {
                let old_step = self.step_size;
                self.step_size = self.config.final_step_size.max(self.step_size * 0.5);
                tracing::debug!(from = old_step, to = self.step_size, "step size halved");
            }
        }

        self.intensity = self
            .intensity
            .clamp(self.config.min_intensity, self.config.max_intensity);

        if self.config.stopping.is_some() && self.evaluate_stopping()? {
            self.is_complete = true;
            tracing::debug!(
                trials = self.trial_count,
                reversals = self.reversal_count,
                threshold = self.estimated_threshold(),
                "staircase complete"
            );
        }

        Ok(self.intensity)
    }

    /// First direction change always counts as a reversal; afterwards only a
    /// flip relative to the previous direction does.
    fn check_for_reversal(&self, should_go_up: bool, should_go_down: bool) -> bool {
        if !self.has_had_first_reversal {
            should_go_up || should_go_down
        } else {
            (should_go_up && !self.last_direction_was_up)
                || (should_go_down && self.last_direction_was_up)
        }
    }

    fn evaluate_stopping(&self) -> Result<bool, StaircaseError> {
        let Some(stopping) = self.config.stopping else {
            return Ok(false);
        };

        if self.trial_count >= stopping.max_trials {
            return Ok(true);
        }

        if self.reversal_count >= stopping.min_reversals {
            let needed = stopping.min_reversals as usize;
            let reversal_trial = self
                .reversal_trials
                .get(needed - 1)
                .copied()
                .ok_or(StaircaseError::InvalidState {
                    needed,
                    recorded: self.reversal_trials.len(),
                })?;
            if self.trial_count - reversal_trial >= stopping.trials_after_min_reversals {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Estimate the threshold as the mean of the most recent reversals.
    ///
    /// With fewer than 4 recorded reversals there is not enough data and the
    /// current intensity is returned instead. Otherwise the last
    /// `min(6, reversal_count)` reversal intensities are averaged; earlier,
    /// less stable reversals fall out of the window by construction.
    pub fn estimated_threshold(&self) -> f64 {
        if self.reversal_intensities.len() < 4 {
            return self.intensity;
        }

        let use_count = self.reversal_intensities.len().min(6);
        let start = self.reversal_intensities.len() - use_count;
        let sum: f64 = self.reversal_intensities[start..].iter().sum();
        sum / use_count as f64
    }

    /// Reinitialize all mutable state from the configuration and clear every
    /// history. The engine behaves as freshly constructed afterwards.
    pub fn reset(&mut self) {
        self.intensity = self.config.initial_intensity;
        self.step_size = self.config.initial_step_size;
        self.trial_count = 0;
        self.reversal_count = 0;
        self.consecutive_correct = 0;
        self.consecutive_incorrect = 0;
        self.last_direction_was_up = false;
        self.has_had_first_reversal = false;
        self.is_complete = false;
        self.intensity_history.clear();
        self.response_history.clear();
        self.reversal_intensities.clear();
        self.reversal_trials.clear();
        tracing::debug!("staircase reset");
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The intensity the next trial should use.
    pub fn current_intensity(&self) -> f64 {
        self.intensity
    }

    /// The current step size.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Number of trials processed.
    pub fn trial_count(&self) -> u32 {
        self.trial_count
    }

    /// Number of direction reversals detected.
    pub fn reversal_count(&self) -> u32 {
        self.reversal_count
    }

    /// Whether the stopping rule has flagged this staircase complete.
    ///
    /// Always `false` when no stopping rule is configured.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Per-trial intensities, recorded before each trial's adjustment.
    pub fn intensity_history(&self) -> &[f64] {
        &self.intensity_history
    }

    /// Per-trial correctness responses.
    pub fn response_history(&self) -> &[bool] {
        &self.response_history
    }

    /// Post-adjustment intensity at each reversal.
    pub fn reversal_intensities(&self) -> &[f64] {
        &self.reversal_intensities
    }

    /// Trial number at which each reversal occurred.
    pub fn reversal_trials(&self) -> &[u32] {
        &self.reversal_trials
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &StaircaseConfig {
        &self.config
    }

    /// Summary statistics for reporting.
    pub fn summary(&self) -> StaircaseSummary {
        let accuracy = if self.response_history.is_empty() {
            0.0
        } else {
            self.response_history.iter().filter(|&&r| r).count() as f64
                / self.response_history.len() as f64
        };
        StaircaseSummary {
            condition: None,
            rule: self.config.rule,
            trial_count: self.trial_count,
            reversal_count: self.reversal_count,
            final_intensity: self.intensity,
            estimated_threshold: self.estimated_threshold(),
            accuracy,
            reversal_intensities: self.reversal_intensities.clone(),
        }
    }

    /// Owned snapshot of the histories for an external persistence layer.
    pub fn snapshot(&self) -> StaircaseSnapshot {
        StaircaseSnapshot {
            intensity_history: self.intensity_history.clone(),
            response_history: self.response_history.clone(),
            reversal_intensities: self.reversal_intensities.clone(),
            reversal_trials: self.reversal_trials.clone(),
            estimated_threshold: self.estimated_threshold(),
        }
    }
}
