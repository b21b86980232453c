//! # staircase
//!
//! Adaptive staircase procedures for psychophysics threshold estimation.
//!
//! This crate implements the classic transformed up/down staircase: a
//! trial-by-trial state machine that adjusts a stimulus intensity (e.g.,
//! display duration in seconds) from a participant's correctness signal,
//! tracks direction reversals, shrinks its step size over the session, and
//! estimates the perceptual threshold from the most recent reversals.
//!
//! ## Common Pitfall: Calling Order
//!
//! The engine must be driven from a single sequential trial loop, exactly
//! once per completed trial, in trial order. There is no internal locking;
//! if several threads drive different conditions, confine each condition's
//! engine to one thread or synchronize externally.
//!
//! ## Quick Start
//!
//! ```
//! use staircase::{StaircaseConfig, StaircaseEngine, StaircaseRule};
//!
//! let config = StaircaseConfig::default()
//!     .rule(StaircaseRule::TwoUpOneDown)
//!     .initial_intensity(0.6)
//!     .intensity_bounds(0.01, 1.0);
//!
//! let mut engine = StaircaseEngine::new(config);
//!
//! // One call per completed trial: correct -> harder, errors -> easier.
//! let next = engine.process_response(true).unwrap();
//! assert!(next <= 0.6);
//! println!("threshold so far: {:.3}", engine.estimated_threshold());
//! ```
//!
//! Several independent staircases (one per experimental condition, e.g.
//! "slow" vs "natural" walking speed) can share one configuration through
//! the [`StaircaseRegistry`]:
//!
//! ```
//! use staircase::{StaircaseConfig, StaircaseRegistry};
//!
//! let mut registry = StaircaseRegistry::new(StaircaseConfig::default());
//! registry.process_response("slow", true).unwrap();
//! registry.process_response("natural", false).unwrap();
//! assert_eq!(registry.trial_count("slow"), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod engine;
mod error;
mod registry;
mod summary;
mod types;

// Re-exports for public API
pub use config::{StaircaseConfig, StoppingRule};
pub use engine::StaircaseEngine;
pub use error::StaircaseError;
pub use registry::StaircaseRegistry;
pub use summary::{StaircaseSnapshot, StaircaseSummary};
pub use types::StaircaseRule;
