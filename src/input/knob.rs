//! Knob (potentiometer) movement tracker.
//!
//! A raw sample only counts as a movement when it passes two gates:
//!
//! - **amplitude**: it differs from the last reported sample by more than
//!   the noise floor (10 counts);
//! - **rate**: more than 50 ms have passed since the last reported movement.
//!
//! Amplitude alone would let slow ADC drift creep into screen churn; time
//! alone would let a single large turn be ignored.

use log::debug;

use crate::config::ControllerConfig;
use crate::inactivity::{ActivityClock, Interaction};
use crate::mapping::{map_date_component, map_temperature};

/// A significant knob movement.  Carries the raw sample; consumers pick
/// the mapping that matches what they are editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnobMovement {
    pub raw: u16,
}

impl KnobMovement {
    /// Setpoint temperature in °F for this knob position.
    pub fn temperature(self) -> f32 {
        map_temperature(self.raw)
    }

    /// Generic date component (0–100) for this knob position.
    pub fn date_component(self) -> u8 {
        map_date_component(self.raw)
    }
}

pub struct KnobTracker {
    noise_floor: u16,
    min_interval_ms: u32,
    /// `None` until the first sample primes the tracker.
    last_value: Option<u16>,
    last_update_ms: u32,
}

impl KnobTracker {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            noise_floor: config.knob_noise_floor,
            min_interval_ms: config.knob_min_interval_ms,
            last_value: None,
            last_update_ms: 0,
        }
    }

    /// Feed one raw sample.  Returns a movement when both gates pass and
    /// the movement did not merely wake the backlight.
    pub fn poll(
        &mut self,
        raw: u16,
        now_ms: u32,
        activity: &mut ActivityClock,
    ) -> Option<KnobMovement> {
        let Some(last) = self.last_value else {
            // Resting position at boot is not a movement.
            self.last_value = Some(raw);
            self.last_update_ms = now_ms;
            return None;
        };

        if raw.abs_diff(last) <= self.noise_floor {
            return None;
        }
        if now_ms.wrapping_sub(self.last_update_ms) <= self.min_interval_ms {
            return None;
        }

        self.last_value = Some(raw);
        self.last_update_ms = now_ms;

        if activity.record(now_ms) == Interaction::Woke {
            debug!("knob: movement to {raw} consumed as backlight wake");
            return None;
        }
        Some(KnobMovement { raw })
    }

    /// Last accepted raw sample, if primed.
    pub fn last_value(&self) -> Option<u16> {
        self.last_value
    }
}
