//! Inactivity supervisor.
//!
//! Two independent idle timeouts run off a single activity timestamp:
//!
//! | Timeout            | Default | Applies            | Action                 |
//! |--------------------|---------|--------------------|------------------------|
//! | Screen revert      | 10 s    | any non-main screen| return to `Main`       |
//! | Backlight off      | 30 s    | every screen       | backlight off          |
//!
//! ## Activity lifecycle
//!
//! 1. The button classifier (press start) and the knob tracker (significant
//!    movement) call [`ActivityClock::record`].
//! 2. `record` resets the idle timer.  If the backlight was off it is turned
//!    back on and [`Interaction::Woke`] is returned: the caller swallows the
//!    input so the first touch after idle only wakes the display.
//! 3. Each poll, [`InactivityMonitor::poll`] compares the idle time against
//!    both timeouts and reports what the service should do.
//!
//! Time never resets the clock by itself; only interactions do.

use log::debug;

use crate::config::ControllerConfig;
use crate::fsm::Screen;

/// Outcome of recording an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// The display was already lit; the input should be acted on.
    Active,
    /// The display was dark and has just been woken; the input is consumed.
    Woke,
}

/// Last-interaction timestamp plus the backlight state it governs.
#[derive(Debug, Clone)]
pub struct ActivityClock {
    last_activity_ms: u32,
    backlight_on: bool,
}

impl ActivityClock {
    /// Backlight starts lit, idle timer starts at `now_ms`.
    pub fn new(now_ms: u32) -> Self {
        Self {
            last_activity_ms: now_ms,
            backlight_on: true,
        }
    }

    /// Register a user interaction at `now_ms`.
    pub fn record(&mut self, now_ms: u32) -> Interaction {
        self.last_activity_ms = now_ms;
        if self.backlight_on {
            Interaction::Active
        } else {
            debug!("activity: backlight woken at {now_ms} ms");
            self.backlight_on = true;
            Interaction::Woke
        }
    }

    /// Milliseconds since the last recorded interaction.
    pub fn idle_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity_ms)
    }

    pub fn last_activity_ms(&self) -> u32 {
        self.last_activity_ms
    }

    pub fn backlight_on(&self) -> bool {
        self.backlight_on
    }

    /// Switch the backlight off (idle timeout).
    pub fn darken(&mut self) {
        self.backlight_on = false;
    }
}

/// What the service must do after an inactivity check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InactivityAction {
    pub turn_off_backlight: bool,
    pub revert_to_main: bool,
}

/// Evaluates the idle timeouts.  Holds only the configured limits.
pub struct InactivityMonitor {
    backlight_timeout_ms: u32,
    revert_timeout_ms: u32,
}

impl InactivityMonitor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            backlight_timeout_ms: config.backlight_timeout_ms,
            revert_timeout_ms: config.revert_timeout_ms,
        }
    }

    /// Check both timeouts for the current screen and backlight state.
    pub fn poll(&self, now_ms: u32, screen: Screen, clock: &ActivityClock) -> InactivityAction {
        let idle = clock.idle_ms(now_ms);
        InactivityAction {
            turn_off_backlight: clock.backlight_on() && idle > self.backlight_timeout_ms,
            revert_to_main: screen != Screen::Main && idle > self.revert_timeout_ms,
        }
    }
}
