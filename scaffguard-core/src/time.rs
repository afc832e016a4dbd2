//! Time sources for reading timestamps
//!
//! Readings are stamped at creation and have no identity beyond that
//! timestamp. The trait keeps the core testable and portable between a
//! host with a wall clock and a gateway with only a tick counter.

/// Timestamp in milliseconds since epoch (or device boot for monotonic sources)
pub type Timestamp = u64;

/// Source of time for stamping readings
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Check if this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;
}

/// Wall clock backed by the OS (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct WallClock;

#[cfg(feature = "std")]
impl TimeSource for WallClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Create a source frozen at the given timestamp
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move the frozen time forward
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}
