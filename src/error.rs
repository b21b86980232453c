//! Error types.

/// Errors produced by staircase operations.
///
/// Normal adaptive operation is infallible: out-of-range responses cannot
/// occur (the input is a boolean) and querying an unknown condition is not an
/// error. The only failure mode is an internal invariant violation in the
/// stopping-rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaircaseError {
    /// The stopping rule required a reversal record that does not exist.
    ///
    /// The trailing-trials clause of the stopping rule reads the trial number
    /// of the `min_reversals`-th reversal. That clause is only evaluated once
    /// `reversal_count >= min_reversals`, and the reversal-trial list always
    /// has exactly `reversal_count` entries, so reaching this error means the
    /// engine's bookkeeping is corrupt.
    #[error("stopping rule needs {needed} recorded reversals, found {recorded}")]
    InvalidState {
        /// Reversal records required by the stopping rule.
        needed: usize,
        /// Reversal records actually present.
        recorded: usize,
    },
}
