//! Property tests for the status classification
//!
//! The classification must be total and deterministic over the whole tilt
//! axis, with the three bands partitioning it exactly.

use proptest::prelude::*;

use scaffguard_core::{Reading, SafetyStatus, StatusEvaluator, VibrationPolicy};

proptest! {
    #[test]
    fn safe_band(tilt in -1000.0f32..=5.0) {
        let evaluator = StatusEvaluator::default();
        prop_assert_eq!(evaluator.evaluate(tilt), SafetyStatus::Safe);
    }

    #[test]
    fn warning_band(tilt in 5.0f32..=10.0) {
        prop_assume!(tilt > 5.0);
        let evaluator = StatusEvaluator::default();
        prop_assert_eq!(evaluator.evaluate(tilt), SafetyStatus::Warning);
    }

    #[test]
    fn danger_band(tilt in 10.0f32..=1000.0) {
        prop_assume!(tilt > 10.0);
        let evaluator = StatusEvaluator::default();
        prop_assert_eq!(evaluator.evaluate(tilt), SafetyStatus::Danger);
    }

    #[test]
    fn evaluation_is_idempotent(tilt in -100.0f32..=100.0) {
        let evaluator = StatusEvaluator::default();
        prop_assert_eq!(evaluator.evaluate(tilt), evaluator.evaluate(tilt));
    }

    #[test]
    fn bands_partition_the_axis(tilt in -100.0f32..=100.0) {
        // Exactly one band claims every finite tilt
        let evaluator = StatusEvaluator::default();
        let status = evaluator.evaluate(tilt);

        let expected = if tilt <= 5.0 {
            SafetyStatus::Safe
        } else if tilt <= 10.0 {
            SafetyStatus::Warning
        } else {
            SafetyStatus::Danger
        };

        prop_assert_eq!(status, expected);
    }

    #[test]
    fn escalation_never_lowers_the_tilt_status(
        tilt in -100.0f32..=100.0,
        vibration in 0.0f32..=5.0,
    ) {
        let tilt_only = StatusEvaluator::default();
        let escalating = StatusEvaluator::default().with_vibration_policy(
            VibrationPolicy::Escalate { warning: 1.5, danger: 2.0 },
        );

        let reading = Reading::new(tilt, vibration, 0);

        prop_assert!(
            escalating.evaluate_reading(&reading) >= tilt_only.evaluate_reading(&reading)
        );
    }
}
