//! Core safety engine for ScaffGuard
//!
//! Classifies scaffold sensor readings into discrete safety levels.
//! Designed to run unchanged on an edge gateway next to the scaffold
//! and on the dashboard host that renders the readings.
//!
//! Key constraints:
//! - No I/O and no side effects anywhere in this crate
//! - Status is a pure function of the reading
//! - No heap allocation in the evaluation path
//!
//! ```
//! use scaffguard_core::{StatusEvaluator, SafetyStatus};
//!
//! let evaluator = StatusEvaluator::default();
//!
//! assert_eq!(evaluator.evaluate(3.0), SafetyStatus::Safe);
//! assert_eq!(evaluator.evaluate(7.5), SafetyStatus::Warning);
//! assert_eq!(evaluator.evaluate(12.0), SafetyStatus::Danger);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod history;
pub mod reading;
pub mod status;
pub mod time;

// Public API
pub use history::ReadingLog;
pub use reading::{AccelVector, Reading};
pub use status::{BuzzerState, SafetyStatus, StatusEvaluator, VibrationPolicy};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
