//! Reading History Example
//!
//! Shows the caller-owned ring buffer the dashboard uses for its trend
//! chart: fixed capacity, oldest entries overwritten, chronological
//! iteration.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_reading_history
//! ```

use scaffguard_core::{
    history::ReadingLog,
    time::{FixedClock, TimeSource},
    Reading, StatusEvaluator,
};

fn main() {
    println!("ScaffGuard Reading History Example");
    println!("==================================\n");

    let evaluator = StatusEvaluator::default();
    let mut clock = FixedClock::new(0);

    // A small log so the overwrite behavior is visible
    let mut log: ReadingLog<5> = ReadingLog::new();

    let tilts = [2.0, 3.5, 6.0, 8.5, 11.0, 12.5, 4.0];

    for tilt in tilts {
        let reading = Reading::new(tilt, 1.0, clock.now());
        log.push(reading);
        clock.advance(5000);
    }

    println!("Pushed {} readings into a log of capacity 5\n", tilts.len());
    println!("Chart window (oldest → newest):");
    for reading in log.iter() {
        let status = evaluator.evaluate(reading.tilt_deg);
        println!(
            "  t={:>5}ms  tilt {:>5.1}°  {} {}",
            reading.timestamp,
            reading.tilt_deg,
            status.marker(),
            status.name()
        );
    }

    println!(
        "\nMean tilt over the window: {:.2}°",
        log.mean_tilt_deg().unwrap()
    );
    println!(
        "Latest reading: {:.1}° at t={}ms",
        log.last().unwrap().tilt_deg,
        log.last().unwrap().timestamp
    );
}
