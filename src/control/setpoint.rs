//! Heater setpoint with knob-jitter suppression.
//!
//! The knob is a cheap potentiometer; a resting hand produces a few tenths
//! of a degree of wobble.  A new value is only committed once it moves more
//! than `setpoint_min_delta_f` (0.5 °F) away from the last committed value.

use log::info;

use crate::config::ControllerConfig;
use crate::mapping::{TEMP_MAX_F, TEMP_MIN_F};

pub struct SetpointController {
    current: f32,
    last_applied: f32,
    min_delta: f32,
}

impl SetpointController {
    pub fn new(config: &ControllerConfig) -> Self {
        let initial = config.initial_setpoint_f.clamp(TEMP_MIN_F, TEMP_MAX_F);
        Self {
            current: initial,
            last_applied: initial,
            min_delta: config.setpoint_min_delta_f,
        }
    }

    /// Offer a knob-mapped temperature.  Returns `true` when it was
    /// committed (the caller redraws the set-temperature screen).
    pub fn apply_knob(&mut self, value: f32) -> bool {
        if (value - self.last_applied).abs() <= self.min_delta {
            return false;
        }
        self.current = value.clamp(TEMP_MIN_F, TEMP_MAX_F);
        self.last_applied = self.current;
        info!("SETPOINT: {:.1}\u{00b0}F", self.current);
        true
    }

    /// Setpoint the heater regulates to (°F).
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn last_applied(&self) -> f32 {
        self.last_applied
    }
}
