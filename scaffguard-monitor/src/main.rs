//! Scaffold safety monitoring daemon
//!
//! Owns the cadence the evaluation core deliberately doesn't: a fixed
//! interval timer samples the (simulated) sensors, classifies the reading,
//! maintains the dashboard history, and on DANGER hands the reading to the
//! dispatcher for exactly one alert attempt. A failed dispatch is logged
//! and the next cycle runs regardless.

mod config;
mod source;

use log::{debug, error, info, warn};

use scaffguard_alerts::AlertDispatcher;
use scaffguard_core::{
    constants::DEFAULT_LOG_CAPACITY, history::ReadingLog, BuzzerState, SafetyStatus,
};

use config::MonitorConfig;
use source::{ReadingSource, SimulatedSensors};

/// Cycles between trend summaries in the log (about a minute at the
/// default cadence)
const SUMMARY_EVERY_CYCLES: u64 = 12;

async fn monitor_loop(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let evaluator = config.evaluator();
    let mut dispatcher = AlertDispatcher::new(config.build_channel()?);
    let mut source = SimulatedSensors::new();
    let mut history: ReadingLog<DEFAULT_LOG_CAPACITY> = ReadingLog::new();

    info!(
        "Starting scaffold monitoring: channel {}, cadence {}s, bands SAFE ≤{}° WARNING ≤{}°",
        dispatcher.channel_name(),
        config.interval.as_secs(),
        evaluator.safe_max_deg(),
        evaluator.warning_max_deg(),
    );

    let mut ticker = tokio::time::interval(config.interval);
    let mut cycles: u64 = 0;

    loop {
        ticker.tick().await;
        cycles += 1;

        let reading = source.sample();
        let status = evaluator.evaluate_reading(&reading);
        let buzzer = BuzzerState::from_levels(reading.tilt_deg, reading.vibration);
        history.push(reading);

        let line = format!(
            "tilt {:.2}° vib {:.2} dist {:.1}cm sound {:.1}dB accel {:.2}m/s² → {} {} (buzzer {})",
            reading.tilt_deg,
            reading.vibration,
            reading.distance_cm.unwrap_or(f32::NAN),
            reading.sound_db.unwrap_or(f32::NAN),
            reading.acceleration_total().unwrap_or(f32::NAN),
            status.marker(),
            status.name(),
            buzzer.name(),
        );

        match status {
            SafetyStatus::Safe => info!("{line}"),
            SafetyStatus::Warning => warn!("{line}"),
            SafetyStatus::Danger => error!("{line}"),
        }

        if status.is_danger() {
            // Exactly one attempt per danger cycle, off the timer thread
            // so the bounded transport timeout can't skew the cadence
            let (outcome, returned) = tokio::task::spawn_blocking(move || {
                let mut dispatcher = dispatcher;
                let outcome = dispatcher.dispatch(&reading);
                (outcome, dispatcher)
            })
            .await
            .expect("dispatch task panicked");
            dispatcher = returned;

            if outcome.delivered {
                info!("Alert delivered via {}", dispatcher.channel_name());
            } else {
                warn!(
                    "Alert NOT delivered: {}",
                    outcome.error_detail.as_deref().unwrap_or("unknown")
                );
            }
        }

        if cycles % SUMMARY_EVERY_CYCLES == 0 {
            if let (Some(mean_tilt), Some(mean_vibration)) =
                (history.mean_tilt_deg(), history.mean_vibration())
            {
                let stats = dispatcher.stats();
                debug!(
                    "Trend over last {} readings: mean tilt {:.2}°, mean vibration {:.2}; alerts {} sent / {} failed",
                    history.len(),
                    mean_tilt,
                    mean_vibration,
                    stats.sent,
                    stats.failed,
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match MonitorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return Err(e.into());
        }
    };

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        let _ = tx.send(());
    });

    // Run the monitoring loop or wait for shutdown
    tokio::select! {
        result = monitor_loop(config) => {
            match result {
                Ok(_) => info!("Monitoring loop ended"),
                Err(e) => error!("Fatal error: {e}"),
            }
        }
        _ = &mut rx => {
            info!("Monitor terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
