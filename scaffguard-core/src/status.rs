//! Safety status classification
//!
//! ## Overview
//!
//! Maps a tilt reading onto a three-level safety scale. The classification
//! is a pure, deterministic function of the reading: the same reading
//! always yields the same status, and evaluating it has no side effects.
//!
//! ## Bands
//!
//! The tilt axis is split into three closed-on-the-lower-branch partitions:
//!
//! ```text
//! tilt (°):  ──────┬──────────┬──────────→
//!            SAFE  5°  WARNING 10°  DANGER
//!            tilt ≤ 5   5 < tilt ≤ 10   tilt > 10
//! ```
//!
//! The boundaries themselves belong to the lower band: 5.0° is SAFE and
//! 10.0° is WARNING. Negative tilt (sensor mounted against the lean
//! direction) classifies SAFE. Non-finite tilt falls through both
//! comparisons and classifies DANGER, which is the conservative outcome
//! for a faulty inclinometer.
//!
//! ## Vibration
//!
//! Whether vibration participates in the status is a deployment decision,
//! not a fixed rule: some sites only use it for the buzzer, others want
//! sustained vibration to escalate the status. See [`VibrationPolicy`].

use crate::{
    constants::{
        BUZZER_TILT_DEG, BUZZER_VIBRATION, DEFAULT_SAFE_MAX_DEG, DEFAULT_WARNING_MAX_DEG,
    },
    reading::Reading,
};

/// Three-level safety classification derived from a reading
///
/// Ordered from least to most severe so callers can take the worse of two
/// classifications with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SafetyStatus {
    /// Scaffold is within normal operating limits
    Safe = 0,
    /// Scaffold needs inspection
    Warning = 1,
    /// Site must be cleared and an alert dispatched
    Danger = 2,
}

impl SafetyStatus {
    /// Human-readable name as shown on the dashboard
    pub const fn name(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "SAFE",
            SafetyStatus::Warning => "WARNING",
            SafetyStatus::Danger => "DANGER",
        }
    }

    /// Display marker associated with the status
    pub const fn marker(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "🟢",
            SafetyStatus::Warning => "🟠",
            SafetyStatus::Danger => "🔴",
        }
    }

    /// True for the level that triggers alert dispatch
    pub const fn is_danger(&self) -> bool {
        matches!(self, SafetyStatus::Danger)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SafetyStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name());
    }
}

/// How vibration folds into the status
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VibrationPolicy {
    /// Vibration is display- and buzzer-only; status derives from tilt alone
    TiltOnly,
    /// Vibration classifies on its own bands and the reading takes the
    /// worse of the tilt and vibration classifications
    Escalate {
        /// Vibration above this level is at least WARNING
        warning: f32,
        /// Vibration above this level is DANGER
        danger: f32,
    },
}

/// Maps tilt (and optionally vibration) readings to a [`SafetyStatus`]
///
/// Thresholds are per-deployment configuration; the defaults match the
/// bands in the module docs. The evaluator holds no mutable state and is
/// freely shareable between cycles.
#[derive(Debug, Clone)]
pub struct StatusEvaluator {
    /// Upper bound of the SAFE band (inclusive)
    safe_max_deg: f32,

    /// Upper bound of the WARNING band (inclusive)
    warning_max_deg: f32,

    /// Vibration participation
    vibration_policy: VibrationPolicy,
}

impl Default for StatusEvaluator {
    fn default() -> Self {
        Self {
            safe_max_deg: DEFAULT_SAFE_MAX_DEG,
            warning_max_deg: DEFAULT_WARNING_MAX_DEG,
            vibration_policy: VibrationPolicy::TiltOnly,
        }
    }
}

impl StatusEvaluator {
    /// Create an evaluator with custom tilt bands
    pub fn new_with_thresholds(safe_max_deg: f32, warning_max_deg: f32) -> Self {
        // Sanity check: the SAFE band can't end above the WARNING band
        let (safe_max_deg, warning_max_deg) = if safe_max_deg > warning_max_deg {
            (warning_max_deg, safe_max_deg)
        } else {
            (safe_max_deg, warning_max_deg)
        };

        Self {
            safe_max_deg,
            warning_max_deg,
            vibration_policy: VibrationPolicy::TiltOnly,
        }
    }

    /// Set the vibration participation policy
    pub fn with_vibration_policy(mut self, policy: VibrationPolicy) -> Self {
        self.vibration_policy = policy;
        self
    }

    /// Upper bound of the SAFE band (inclusive)
    pub fn safe_max_deg(&self) -> f32 {
        self.safe_max_deg
    }

    /// Upper bound of the WARNING band (inclusive)
    pub fn warning_max_deg(&self) -> f32 {
        self.warning_max_deg
    }

    /// Classify a tilt angle
    ///
    /// Total over all `f32` inputs: negative tilt is SAFE, non-finite tilt
    /// is DANGER.
    pub fn evaluate(&self, tilt_deg: f32) -> SafetyStatus {
        if tilt_deg <= self.safe_max_deg {
            SafetyStatus::Safe
        } else if tilt_deg <= self.warning_max_deg {
            SafetyStatus::Warning
        } else {
            SafetyStatus::Danger
        }
    }

    /// Classify a full reading under the configured vibration policy
    pub fn evaluate_reading(&self, reading: &Reading) -> SafetyStatus {
        let tilt_status = self.evaluate(reading.tilt_deg);

        match self.vibration_policy {
            VibrationPolicy::TiltOnly => tilt_status,
            VibrationPolicy::Escalate { warning, danger } => {
                let vibration_status = if reading.vibration > danger {
                    SafetyStatus::Danger
                } else if reading.vibration > warning {
                    SafetyStatus::Warning
                } else {
                    SafetyStatus::Safe
                };

                tilt_status.max(vibration_status)
            }
        }
    }
}

/// On-site buzzer state, simulated from the current reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuzzerState {
    /// Buzzer is sounding
    On,
    /// Buzzer is silent
    Off,
}

impl BuzzerState {
    /// Derive the buzzer state from the raw tilt and vibration levels
    ///
    /// The buzzer has its own fixed trip points independent of the
    /// configurable status bands: it sounds when tilt exceeds 10° or
    /// vibration exceeds 2.0.
    pub fn from_levels(tilt_deg: f32, vibration: f32) -> Self {
        if tilt_deg > BUZZER_TILT_DEG || vibration > BUZZER_VIBRATION {
            BuzzerState::On
        } else {
            BuzzerState::Off
        }
    }

    /// Name as shown on the dashboard
    pub const fn name(&self) -> &'static str {
        match self {
            BuzzerState::On => "ON",
            BuzzerState::Off => "OFF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilt_bands() {
        let evaluator = StatusEvaluator::default();

        assert_eq!(evaluator.evaluate(0.0), SafetyStatus::Safe);
        assert_eq!(evaluator.evaluate(3.0), SafetyStatus::Safe);
        assert_eq!(evaluator.evaluate(7.5), SafetyStatus::Warning);
        assert_eq!(evaluator.evaluate(12.0), SafetyStatus::Danger);
    }

    #[test]
    fn band_boundaries_are_closed_below() {
        let evaluator = StatusEvaluator::default();

        assert_eq!(evaluator.evaluate(5.0), SafetyStatus::Safe);
        assert_eq!(evaluator.evaluate(10.0), SafetyStatus::Warning);
        assert_eq!(evaluator.evaluate(10.0001), SafetyStatus::Danger);
    }

    #[test]
    fn negative_tilt_is_safe() {
        let evaluator = StatusEvaluator::default();

        assert_eq!(evaluator.evaluate(-4.0), SafetyStatus::Safe);
        assert_eq!(evaluator.evaluate(f32::NEG_INFINITY), SafetyStatus::Safe);
    }

    #[test]
    fn non_finite_tilt_is_danger() {
        let evaluator = StatusEvaluator::default();

        assert_eq!(evaluator.evaluate(f32::NAN), SafetyStatus::Danger);
        assert_eq!(evaluator.evaluate(f32::INFINITY), SafetyStatus::Danger);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let evaluator = StatusEvaluator::default();

        for tilt in [-3.0, 0.0, 5.0, 7.2, 10.0, 14.9] {
            assert_eq!(evaluator.evaluate(tilt), evaluator.evaluate(tilt));
        }
    }

    #[test]
    fn inverted_thresholds_are_normalized() {
        let evaluator = StatusEvaluator::new_with_thresholds(10.0, 5.0);

        assert_eq!(evaluator.safe_max_deg(), 5.0);
        assert_eq!(evaluator.warning_max_deg(), 10.0);
    }

    #[test]
    fn tilt_only_policy_ignores_vibration() {
        let evaluator = StatusEvaluator::default();
        let reading = Reading::new(3.0, 2.4, 1000);

        assert_eq!(evaluator.evaluate_reading(&reading), SafetyStatus::Safe);
    }

    #[test]
    fn escalate_policy_takes_worse_classification() {
        let evaluator = StatusEvaluator::default().with_vibration_policy(
            VibrationPolicy::Escalate {
                warning: 1.5,
                danger: 2.0,
            },
        );

        // Tilt safe, vibration past the danger level
        let reading = Reading::new(3.0, 2.3, 1000);
        assert_eq!(evaluator.evaluate_reading(&reading), SafetyStatus::Danger);

        // Tilt warning, vibration safe
        let reading = Reading::new(8.0, 0.5, 1000);
        assert_eq!(evaluator.evaluate_reading(&reading), SafetyStatus::Warning);

        // Both calm
        let reading = Reading::new(2.0, 0.5, 1000);
        assert_eq!(evaluator.evaluate_reading(&reading), SafetyStatus::Safe);
    }

    #[test]
    fn buzzer_trip_points() {
        assert_eq!(BuzzerState::from_levels(3.0, 0.5), BuzzerState::Off);
        assert_eq!(BuzzerState::from_levels(10.5, 0.5), BuzzerState::On);
        assert_eq!(BuzzerState::from_levels(3.0, 2.1), BuzzerState::On);
        // Trip points are exclusive
        assert_eq!(BuzzerState::from_levels(10.0, 2.0), BuzzerState::Off);
    }

    #[test]
    fn status_ordering() {
        assert!(SafetyStatus::Safe < SafetyStatus::Warning);
        assert!(SafetyStatus::Warning < SafetyStatus::Danger);
        assert!(SafetyStatus::Danger.is_danger());
        assert!(!SafetyStatus::Warning.is_danger());
    }
}
