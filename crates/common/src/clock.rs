//! Clock and timing utilities.
//!
//! Video sources are timestamped against a clock anchored at session start.
//! Live sessions use the monotonic [`SessionClock`]; replays and tests use
//! [`TickClock`], which only moves when the driver advances it so a run is
//! fully deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Anything that can report nanoseconds elapsed since session start.
pub trait Clock: Send + Sync {
    fn now_ns(&self) -> u64;
}

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Get nanoseconds elapsed since session start.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Get seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}

impl Clock for SessionClock {
    fn now_ns(&self) -> u64 {
        self.elapsed_ns()
    }
}

/// Virtual clock advanced by a fixed interval per tick.
///
/// Clones share the same counter, so a driver can advance the clock that a
/// video source reads from.
#[derive(Debug, Clone)]
pub struct TickClock {
    now_ns: Arc<AtomicU64>,
    interval_ns: u64,
}

impl TickClock {
    /// Create a virtual clock ticking at `rate_hz`, starting at zero.
    pub fn new(rate_hz: u32) -> Self {
        Self {
            now_ns: Arc::new(AtomicU64::new(0)),
            interval_ns: 1_000_000_000 / rate_hz.max(1) as u64,
        }
    }

    /// Move the clock forward by one tick interval and return the new time.
    pub fn advance(&self) -> u64 {
        self.now_ns.fetch_add(self.interval_ns, Ordering::SeqCst) + self.interval_ns
    }

    /// Tick interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.interval_ns
    }
}

impl Clock for TickClock {
    fn now_ns(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
}

/// Rate limiter for periodic work inside a faster loop.
#[derive(Debug)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / target_hz.max(1) as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_clock_elapsed() {
        let clock = SessionClock::start();
        assert!(clock.elapsed_ns() < 1_000_000_000);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((SessionClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
        assert_eq!(SessionClock::secs_to_ns(2.0), 2_000_000_000);
    }

    #[test]
    fn test_tick_clock_shared_between_clones() {
        let clock = TickClock::new(60);
        let reader = clock.clone();
        assert_eq!(reader.now_ns(), 0);

        clock.advance();
        clock.advance();
        assert_eq!(reader.now_ns(), 2 * 16_666_666);
        assert_eq!(clock.interval_ns(), 16_666_666);
    }

    #[test]
    fn test_tick_clock_zero_rate_does_not_panic() {
        let clock = TickClock::new(0);
        assert_eq!(clock.advance(), 1_000_000_000);
    }

    #[test]
    fn test_rate_controller() {
        let mut ctrl = RateController::new(60);
        assert!(ctrl.should_tick(0));
        assert!(!ctrl.should_tick(1_000_000));
        assert!(ctrl.should_tick(17_000_000));
    }
}
