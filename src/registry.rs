//! Multi-condition staircase registry.

use std::collections::HashMap;

use crate::config::StaircaseConfig;
use crate::engine::StaircaseEngine;
use crate::error::StaircaseError;
use crate::summary::StaircaseSummary;

/// Independent staircases for any number of experimental conditions.
///
/// Each condition label (e.g. `"slow"`, `"natural"`) gets its own
/// [`StaircaseEngine`], created lazily on first use. All engines share one
/// configuration but track their own state.
///
/// Registry engines never flag themselves complete: any stopping rule in the
/// shared configuration is dropped at construction, and stopping is the
/// caller's responsibility (typically via [`trial_count`](Self::trial_count)
/// and [`reversal_count`](Self::reversal_count)).
///
/// # Example
///
/// ```
/// use staircase::{StaircaseConfig, StaircaseRegistry};
///
/// let mut registry = StaircaseRegistry::new(StaircaseConfig::default());
/// let next_slow = registry.process_response("slow", true).unwrap();
/// let next_natural = registry.process_response("natural", false).unwrap();
/// assert!(next_slow <= next_natural);
/// ```
#[derive(Debug, Clone)]
pub struct StaircaseRegistry {
    config: StaircaseConfig,
    staircases: HashMap<String, StaircaseEngine>,
}

impl StaircaseRegistry {
    /// Create a registry whose engines will share `config`.
    ///
    /// Any stopping rule in `config` is removed; registry staircases run
    /// until the caller stops driving them.
    pub fn new(mut config: StaircaseConfig) -> Self {
        if config.stopping.take().is_some() {
            tracing::debug!("stopping rule ignored for registry staircases");
        }
        Self {
            config,
            staircases: HashMap::new(),
        }
    }

    /// Process a response for a condition, creating its staircase on first
    /// use, and return the next trial's intensity.
    ///
    /// # Errors
    ///
    /// Propagates [`StaircaseError`] from the underlying engine.
    pub fn process_response(
        &mut self,
        condition: &str,
        correct: bool,
    ) -> Result<f64, StaircaseError> {
        self.get_or_create(condition).process_response(correct)
    }

    /// Current intensity for a condition, creating its staircase if absent.
    pub fn current_intensity(&mut self, condition: &str) -> f64 {
        self.get_or_create(condition).current_intensity()
    }

    /// Estimated threshold for a condition, creating its staircase if absent.
    pub fn estimated_threshold(&mut self, condition: &str) -> f64 {
        self.get_or_create(condition).estimated_threshold()
    }

    /// Trials completed for a condition; 0 for unknown conditions.
    ///
    /// Unlike the intensity/threshold getters, this never creates state.
    pub fn trial_count(&self, condition: &str) -> u32 {
        self.staircases
            .get(condition)
            .map_or(0, StaircaseEngine::trial_count)
    }

    /// Reversals recorded for a condition; 0 for unknown conditions.
    pub fn reversal_count(&self, condition: &str) -> u32 {
        self.staircases
            .get(condition)
            .map_or(0, StaircaseEngine::reversal_count)
    }

    /// Per-trial intensities for a condition; empty for unknown conditions.
    pub fn intensity_history(&self, condition: &str) -> Vec<f64> {
        self.staircases
            .get(condition)
            .map_or_else(Vec::new, |s| s.intensity_history().to_vec())
    }

    /// Per-trial responses for a condition; empty for unknown conditions.
    pub fn response_history(&self, condition: &str) -> Vec<bool> {
        self.staircases
            .get(condition)
            .map_or_else(Vec::new, |s| s.response_history().to_vec())
    }

    /// Read access to a condition's engine without creating it.
    pub fn engine(&self, condition: &str) -> Option<&StaircaseEngine> {
        self.staircases.get(condition)
    }

    /// Remove a condition's staircase; the next access recreates it fresh.
    pub fn reset_condition(&mut self, condition: &str) {
        if self.staircases.remove(condition).is_some() {
            tracing::debug!(condition, "staircase reset");
        }
    }

    /// Remove every staircase.
    pub fn reset_all(&mut self) {
        self.staircases.clear();
        tracing::debug!("all staircases reset");
    }

    /// Labels of all conditions currently present.
    pub fn active_conditions(&self) -> Vec<String> {
        self.staircases.keys().cloned().collect()
    }

    /// Summary statistics for every active condition, labelled.
    pub fn summaries(&self) -> Vec<StaircaseSummary> {
        let mut summaries: Vec<StaircaseSummary> = self
            .staircases
            .iter()
            .map(|(label, engine)| {
                let mut summary = engine.summary();
                summary.condition = Some(label.clone());
                summary
            })
            .collect();
        summaries.sort_by(|a, b| a.condition.cmp(&b.condition));
        summaries
    }

    fn get_or_create(&mut self, condition: &str) -> &mut StaircaseEngine {
        if !self.staircases.contains_key(condition) {
            tracing::debug!(condition, "creating staircase");
        }
        self.staircases
            .entry(condition.to_string())
            .or_insert_with(|| StaircaseEngine::new(self.config.clone()))
    }
}
