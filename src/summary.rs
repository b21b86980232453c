//! Session reporting and persistence views.

use std::fmt;

use crate::types::StaircaseRule;

/// Summary statistics for one staircase.
///
/// Produced by [`StaircaseEngine::summary`](crate::StaircaseEngine::summary)
/// and [`StaircaseRegistry::summaries`](crate::StaircaseRegistry::summaries).
/// The `Display` impl renders a human-readable multi-line report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaircaseSummary {
    /// Condition label, when the summary comes from a registry.
    pub condition: Option<String>,

    /// Rule the staircase ran under.
    pub rule: StaircaseRule,

    /// Trials completed.
    pub trial_count: u32,

    /// Reversals recorded.
    pub reversal_count: u32,

    /// Intensity after the last processed trial.
    pub final_intensity: f64,

    /// Threshold estimate (mean of recent reversal intensities).
    pub estimated_threshold: f64,

    /// Fraction of correct responses over the whole session (0 when no
    /// trials have run).
    pub accuracy: f64,

    /// Post-adjustment intensity at each reversal.
    pub reversal_intensities: Vec<f64>,
}

impl fmt::Display for StaircaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.condition {
            Some(label) => writeln!(f, "=== STAIRCASE SUMMARY [{label}] ===")?,
            None => writeln!(f, "=== STAIRCASE SUMMARY ===")?,
        }
        writeln!(f, "Rule: {:?} (target {:.1}%)", self.rule, self.rule.target_accuracy() * 100.0)?;
        writeln!(f, "Trials completed: {}", self.trial_count)?;
        writeln!(f, "Reversals: {}", self.reversal_count)?;
        writeln!(f, "Final intensity: {:.3}", self.final_intensity)?;
        writeln!(f, "Estimated threshold: {:.3}", self.estimated_threshold)?;
        writeln!(f, "Overall accuracy: {:.1}%", self.accuracy * 100.0)?;
        let reversals = self
            .reversal_intensities
            .iter()
            .map(|r| format!("{r:.3}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Reversal intensities: {reversals}")
    }
}

/// Owned snapshot of a staircase's histories.
///
/// The boundary handed to an external persistence layer (CSV writer, plotting
/// tool). Detached from the engine: further trials do not mutate it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaircaseSnapshot {
    /// Per-trial intensities, recorded before each trial's adjustment.
    pub intensity_history: Vec<f64>,

    /// Per-trial correctness responses.
    pub response_history: Vec<bool>,

    /// Post-adjustment intensity at each reversal.
    pub reversal_intensities: Vec<f64>,

    /// Trial number at which each reversal occurred.
    pub reversal_trials: Vec<u32>,

    /// Threshold estimate at snapshot time.
    pub estimated_threshold: f64,
}
