//! Scaffold sensor readings
//!
//! A `Reading` is one snapshot of the scaffold-mounted sensor rig: tilt and
//! vibration always, distance-from-ground, sound level and acceleration when
//! the deployment carries those sensors. Readings are immutable once
//! created, produced fresh each cycle, and have no identity beyond their
//! creation timestamp. They are never persisted outside the caller-owned
//! [`ReadingLog`](crate::history::ReadingLog).

use crate::time::Timestamp;

/// Raw accelerometer sample in m/s² per axis
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelVector {
    /// Acceleration along the scaffold's long axis
    pub x: f32,
    /// Acceleration across the scaffold
    pub y: f32,
    /// Vertical acceleration
    pub z: f32,
}

impl AccelVector {
    /// Total acceleration magnitude, √(x² + y² + z²)
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// One snapshot of the scaffold sensors
///
/// Only tilt and vibration are guaranteed; the remaining channels are
/// `None` on rigs that don't carry the corresponding sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Inclination angle in degrees, the primary safety signal
    pub tilt_deg: f32,
    /// Vibration magnitude, the secondary signal
    pub vibration: f32,
    /// Distance from ground in cm, if the rig has an ultrasonic sensor
    pub distance_cm: Option<f32>,
    /// Sound level in dB, if the rig has a microphone
    pub sound_db: Option<f32>,
    /// Accelerometer sample, if the rig has an IMU
    pub acceleration: Option<AccelVector>,
    /// Creation time in milliseconds
    pub timestamp: Timestamp,
}

impl Reading {
    /// Create a reading carrying only the mandatory channels
    pub fn new(tilt_deg: f32, vibration: f32, timestamp: Timestamp) -> Self {
        Self {
            tilt_deg,
            vibration,
            distance_cm: None,
            sound_db: None,
            acceleration: None,
            timestamp,
        }
    }

    /// Attach a distance-from-ground sample
    pub fn with_distance(mut self, distance_cm: f32) -> Self {
        self.distance_cm = Some(distance_cm);
        self
    }

    /// Attach a sound level sample
    pub fn with_sound(mut self, sound_db: f32) -> Self {
        self.sound_db = Some(sound_db);
        self
    }

    /// Attach an accelerometer sample
    pub fn with_acceleration(mut self, acceleration: AccelVector) -> Self {
        self.acceleration = Some(acceleration);
        self
    }

    /// Total acceleration magnitude, if an accelerometer sample is present
    pub fn acceleration_total(&self) -> Option<f32> {
        self.acceleration.map(|a| a.magnitude())
    }

    /// Check that every present channel is a finite number
    ///
    /// A reading that fails this check came from a faulty sensor; the
    /// evaluator still accepts it (non-finite tilt classifies DANGER), but
    /// callers may want to drop it from the display log.
    pub fn is_finite(&self) -> bool {
        self.tilt_deg.is_finite()
            && self.vibration.is_finite()
            && self.distance_cm.map_or(true, f32::is_finite)
            && self.sound_db.map_or(true, f32::is_finite)
            && self
                .acceleration
                .map_or(true, |a| a.x.is_finite() && a.y.is_finite() && a.z.is_finite())
    }
}
