//! Momentary button press classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up. The hardware adapter samples
//! the level every poll and hands `pressed: bool` to [`ButtonClassifier::poll`],
//! which runs the debounce + classification state machine.
//!
//! ## Classification (on release)
//!
//! | Held for          | Event                |
//! |-------------------|----------------------|
//! | `<= 50 ms`        | `None` (bounce)      |
//! | `50 ms .. 3 s`    | `Short`              |
//! | `>= 3 s`          | `Long`               |
//!
//! Exactly one event is produced per release; every other poll yields
//! `None`.  The press start and every classified release are recorded as
//! user activity; if the press start wakes the backlight the whole press is
//! swallowed.

use log::debug;

use crate::config::ControllerConfig;
use crate::inactivity::{ActivityClock, Interaction};

/// Classified result of one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressEvent {
    None,
    Short,
    Long,
}

/// Internal state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    Pressed { since_ms: u32, woke: bool },
}

pub struct ButtonClassifier {
    debounce_ms: u32,
    long_press_ms: u32,
    state: PressState,
}

impl ButtonClassifier {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
            state: PressState::Idle,
        }
    }

    /// Call once per poll with the sampled level and monotonic time.
    pub fn poll(
        &mut self,
        pressed: bool,
        now_ms: u32,
        activity: &mut ActivityClock,
    ) -> PressEvent {
        match self.state {
            PressState::Idle => {
                if pressed {
                    let woke = activity.record(now_ms) == Interaction::Woke;
                    self.state = PressState::Pressed {
                        since_ms: now_ms,
                        woke,
                    };
                }
                PressEvent::None
            }

            PressState::Pressed { since_ms, woke } => {
                if pressed {
                    return PressEvent::None;
                }
                self.state = PressState::Idle;

                let held_ms = now_ms.wrapping_sub(since_ms);
                if woke {
                    debug!("button: {held_ms} ms press consumed as backlight wake");
                    return PressEvent::None;
                }
                let event = self.classify(held_ms);
                if event != PressEvent::None {
                    // Idle time restarts from the release, not the press.
                    activity.record(now_ms);
                }
                event
            }
        }
    }

    /// True while the button is held down (between press and release).
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PressState::Pressed { .. })
    }

    fn classify(&self, held_ms: u32) -> PressEvent {
        if held_ms >= self.long_press_ms {
            PressEvent::Long
        } else if held_ms > self.debounce_ms {
            PressEvent::Short
        } else {
            debug!("button: {held_ms} ms blip filtered as bounce");
            PressEvent::None
        }
    }
}
