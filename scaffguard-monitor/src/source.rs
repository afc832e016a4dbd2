//! Reading sources
//!
//! The monitor is source-agnostic: anything that can produce one
//! [`Reading`] per cycle fits. The shipped implementation simulates the
//! scaffold sensor rig with uniform draws over each sensor's range, which
//! is what runs until real telemetry is wired in.

use rand::{rngs::StdRng, Rng, SeedableRng};

use scaffguard_core::{
    constants::{
        ACCEL_SENSOR_MAX_MPS2, DISTANCE_SENSOR_MAX_CM, DISTANCE_SENSOR_MIN_CM,
        SOUND_SENSOR_MAX_DB, SOUND_SENSOR_MIN_DB, TILT_SENSOR_MAX_DEG, VIBRATION_SENSOR_MAX,
    },
    time::{TimeSource, WallClock},
    AccelVector, Reading,
};

/// Produces one reading per evaluation cycle
pub trait ReadingSource {
    /// Sample the sensors now
    fn sample(&mut self) -> Reading;
}

/// Simulated scaffold sensor rig
///
/// Draws every channel uniformly over its sensor range and rounds to two
/// decimals, the resolution the real rig reports at.
pub struct SimulatedSensors {
    rng: StdRng,
    clock: WallClock,
}

impl SimulatedSensors {
    /// Simulator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            clock: WallClock,
        }
    }

    /// Simulator with a fixed seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            clock: WallClock,
        }
    }
}

impl Default for SimulatedSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSource for SimulatedSensors {
    fn sample(&mut self) -> Reading {
        let tilt = round2(self.rng.gen_range(0.0..=TILT_SENSOR_MAX_DEG));
        let vibration = round2(self.rng.gen_range(0.0..=VIBRATION_SENSOR_MAX));
        let distance = round2(
            self.rng
                .gen_range(DISTANCE_SENSOR_MIN_CM..=DISTANCE_SENSOR_MAX_CM),
        );
        let sound = round2(self.rng.gen_range(SOUND_SENSOR_MIN_DB..=SOUND_SENSOR_MAX_DB));
        let acceleration = AccelVector {
            x: round2(self.rng.gen_range(-ACCEL_SENSOR_MAX_MPS2..=ACCEL_SENSOR_MAX_MPS2)),
            y: round2(self.rng.gen_range(-ACCEL_SENSOR_MAX_MPS2..=ACCEL_SENSOR_MAX_MPS2)),
            z: round2(self.rng.gen_range(-ACCEL_SENSOR_MAX_MPS2..=ACCEL_SENSOR_MAX_MPS2)),
        };

        Reading::new(tilt, vibration, self.clock.now())
            .with_distance(distance)
            .with_sound(sound)
            .with_acceleration(acceleration)
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_sensor_ranges() {
        let mut source = SimulatedSensors::seeded(42);

        for _ in 0..200 {
            let reading = source.sample();

            assert!(reading.is_finite());
            assert!((0.0..=TILT_SENSOR_MAX_DEG).contains(&reading.tilt_deg));
            assert!((0.0..=VIBRATION_SENSOR_MAX).contains(&reading.vibration));

            let distance = reading.distance_cm.unwrap();
            assert!((DISTANCE_SENSOR_MIN_CM..=DISTANCE_SENSOR_MAX_CM).contains(&distance));

            let sound = reading.sound_db.unwrap();
            assert!((SOUND_SENSOR_MIN_DB..=SOUND_SENSOR_MAX_DB).contains(&sound));

            let accel = reading.acceleration.unwrap();
            for axis in [accel.x, accel.y, accel.z] {
                assert!((-ACCEL_SENSOR_MAX_MPS2..=ACCEL_SENSOR_MAX_MPS2).contains(&axis));
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mut a = SimulatedSensors::seeded(7);
        let mut b = SimulatedSensors::seeded(7);

        for _ in 0..10 {
            let ra = a.sample();
            let rb = b.sample();
            assert_eq!(ra.tilt_deg, rb.tilt_deg);
            assert_eq!(ra.vibration, rb.vibration);
        }
    }

    #[test]
    fn readings_report_two_decimals() {
        let mut source = SimulatedSensors::seeded(1);
        let reading = source.sample();

        let scaled = reading.tilt_deg * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-3);
    }
}
