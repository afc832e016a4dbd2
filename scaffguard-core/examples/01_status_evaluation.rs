//! Basic Status Evaluation Example
//!
//! Demonstrates the simplest use case of ScaffGuard: classifying tilt
//! readings into the three safety bands and simulating the on-site buzzer.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_status_evaluation
//! ```

use scaffguard_core::{BuzzerState, Reading, SafetyStatus, StatusEvaluator, VibrationPolicy};

fn main() {
    println!("ScaffGuard Status Evaluation Example");
    println!("====================================\n");

    let evaluator = StatusEvaluator::default();

    println!("Tilt bands:");
    println!("  SAFE    up to {}°", evaluator.safe_max_deg());
    println!("  WARNING up to {}°", evaluator.warning_max_deg());
    println!("  DANGER  above that\n");

    let test_cases = [
        (0.0, "Scaffold standing straight"),
        (5.0, "Exactly on the SAFE bound"),
        (7.5, "Leaning, needs inspection"),
        (10.0, "Exactly on the WARNING bound"),
        (12.0, "Clear the site"),
        (-4.0, "Sensor mounted against the lean"),
    ];

    for (tilt, description) in &test_cases {
        let status = evaluator.evaluate(*tilt);
        println!(
            "{:<38} {:>6.1}° → {} {}",
            description,
            tilt,
            status.marker(),
            status.name()
        );
    }

    // Vibration can optionally escalate the status
    let escalating = StatusEvaluator::default()
        .with_vibration_policy(VibrationPolicy::Escalate {
            warning: 1.5,
            danger: 2.0,
        });

    let shaking = Reading::new(3.0, 2.3, 0);
    println!(
        "\nTilt {:.1}° but vibration {:.1} under the escalation policy → {}",
        shaking.tilt_deg,
        shaking.vibration,
        escalating.evaluate_reading(&shaking).name()
    );

    // The buzzer has its own fixed trip points
    println!(
        "Buzzer at tilt {:.1}°, vibration {:.1}: {}",
        shaking.tilt_deg,
        shaking.vibration,
        BuzzerState::from_levels(shaking.tilt_deg, shaking.vibration).name()
    );

    assert_eq!(evaluator.evaluate(12.0), SafetyStatus::Danger);
}
