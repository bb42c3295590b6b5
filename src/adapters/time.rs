//! System clock adapter.
//!
//! Provides monotonic uptime and a settable wall clock for the panel.
//!
//! - **`target_os = "espidf"`** — uptime wraps `esp_timer_get_time()` from
//!   the ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! The wall clock is kept as a base `NaiveDateTime` plus the uptime elapsed
//! since that base was taken, so [`ClockPort::set_time`] simply re-bases it.

use chrono::{NaiveDateTime, TimeDelta};
use log::info;

use crate::app::ports::ClockPort;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    /// Wall-clock time at `base_uptime_ms`.
    base: NaiveDateTime,
    base_uptime_ms: u64,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Seed the wall clock from the system time (epoch on an unsynced board).
    pub fn new() -> Self {
        let mut clock = Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            base: NaiveDateTime::default(),
            base_uptime_ms: 0,
        };
        clock.base = system_time();
        clock.base_uptime_ms = clock.uptime_ms_u64();
        clock
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms_u64(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms_u64(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl ClockPort for SystemClock {
    fn uptime_ms(&self) -> u32 {
        self.uptime_ms_u64() as u32
    }

    fn now(&self) -> NaiveDateTime {
        let elapsed = self.uptime_ms_u64().saturating_sub(self.base_uptime_ms);
        let delta = TimeDelta::try_milliseconds(elapsed as i64).unwrap_or(TimeDelta::zero());
        self.base.checked_add_signed(delta).unwrap_or(self.base)
    }

    fn set_time(&mut self, time: NaiveDateTime) {
        self.base = time;
        self.base_uptime_ms = self.uptime_ms_u64();
        info!("clock: wall time set to {}", time);
    }
}

/// Wall-clock time reported by the OS, as naive UTC.
fn system_time() -> NaiveDateTime {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64);
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default()
}
