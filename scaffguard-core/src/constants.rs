//! Constants for ScaffGuard Core
//!
//! Centralized numeric values used throughout the system. Thresholds come
//! from the deployed scaffold installations these defaults were tuned on;
//! sensor ranges come from the simulated sensor rig. Names carry units.

// ===== SAFETY THRESHOLDS =====

/// Upper bound of the SAFE tilt band (degrees, inclusive).
///
/// A scaffold leaning up to this angle is considered structurally sound.
/// Negative tilt readings (sensor mounted against the lean direction) also
/// classify as SAFE.
pub const DEFAULT_SAFE_MAX_DEG: f32 = 5.0;

/// Upper bound of the WARNING tilt band (degrees, inclusive).
///
/// Between the SAFE bound and this angle the scaffold needs inspection;
/// above it the site must be cleared.
pub const DEFAULT_WARNING_MAX_DEG: f32 = 10.0;

/// Tilt angle above which the on-site buzzer sounds (degrees).
pub const BUZZER_TILT_DEG: f32 = 10.0;

/// Vibration level above which the on-site buzzer sounds.
pub const BUZZER_VIBRATION: f32 = 2.0;

// ===== SENSOR RANGES =====

/// Full-scale tilt reading of the inclinometer (degrees).
///
/// Also the upper bound of the dashboard gauge.
pub const TILT_SENSOR_MAX_DEG: f32 = 15.0;

/// Full-scale vibration reading (unitless magnitude).
pub const VIBRATION_SENSOR_MAX: f32 = 2.5;

/// Minimum ultrasonic distance-from-ground reading (cm).
pub const DISTANCE_SENSOR_MIN_CM: f32 = 50.0;

/// Maximum ultrasonic distance-from-ground reading (cm).
pub const DISTANCE_SENSOR_MAX_CM: f32 = 200.0;

/// Minimum microphone sound level reading (dB).
pub const SOUND_SENSOR_MIN_DB: f32 = 20.0;

/// Maximum microphone sound level reading (dB).
pub const SOUND_SENSOR_MAX_DB: f32 = 100.0;

/// Accelerometer full scale per axis (m/s²).
pub const ACCEL_SENSOR_MAX_MPS2: f32 = 10.0;

// ===== TIME =====

/// Default evaluation cycle cadence (seconds).
///
/// Matches the dashboard refresh interval.
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 5;

// ===== BUFFERS =====

/// Default capacity of the caller-owned reading log.
///
/// At the default cadence this holds a bit over five minutes of history,
/// enough for the dashboard trend chart.
pub const DEFAULT_LOG_CAPACITY: usize = 64;
