//! Dispatch Outcome Example
//!
//! Shows how the dispatcher converts every transport result into an
//! `AlertOutcome` instead of letting failures escape, using an in-memory
//! stub channel so the example runs without network access.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_stub_dispatch
//! ```

use scaffguard_alerts::{AlertChannel, AlertDispatcher, AlertError, AlertMessage};
use scaffguard_core::{Reading, StatusEvaluator};

/// Stub channel that fails every other send
struct FlakyChannel {
    calls: usize,
}

impl AlertChannel for FlakyChannel {
    fn send(&mut self, message: &AlertMessage) -> Result<(), AlertError> {
        self.calls += 1;
        println!("  [flaky-stub] asked to send: {}", message.body());

        if self.calls % 2 == 0 {
            Err(AlertError::Transport("carrier timeout".into()))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "flaky-stub"
    }
}

fn main() {
    println!("ScaffGuard Dispatch Outcome Example");
    println!("===================================\n");

    let evaluator = StatusEvaluator::default();
    let mut dispatcher = AlertDispatcher::new(FlakyChannel { calls: 0 });

    let readings = [
        Reading::new(3.0, 1.0, 0),
        Reading::new(12.0, 2.1, 5000),
        Reading::new(13.4, 2.4, 10_000),
        Reading::new(7.5, 1.2, 15_000),
    ];

    for reading in readings {
        let status = evaluator.evaluate_reading(&reading);
        println!(
            "cycle t={:>5}ms tilt {:>5.1}° → {} {}",
            reading.timestamp,
            reading.tilt_deg,
            status.marker(),
            status.name()
        );

        // Dispatch only on DANGER; the dispatcher does not re-check
        if status.is_danger() {
            let outcome = dispatcher.dispatch(&reading);
            if outcome.delivered {
                println!("  alert delivered");
            } else {
                println!(
                    "  alert NOT delivered: {}",
                    outcome.error_detail.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    let stats = dispatcher.stats();
    println!(
        "\ndispatch stats: {} sent, {} failed, last error: {:?}",
        stats.sent, stats.failed, stats.last_error
    );
}
