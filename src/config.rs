//! Controller configuration parameters
//!
//! All tunable timing and threshold parameters for the panel.
//! Defaults match the shipped hardware; a JSON blob can override them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::{TEMP_MAX_F, TEMP_MIN_F};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Button ---
    /// Presses held this long or less are treated as contact bounce (ms)
    pub debounce_ms: u32,
    /// Presses held at least this long classify as long presses (ms)
    pub long_press_ms: u32,

    // --- Knob ---
    /// Raw-count change that must be exceeded to count as movement
    pub knob_noise_floor: u16,
    /// Minimum time between two reported movements (ms)
    pub knob_min_interval_ms: u32,

    // --- Setpoint ---
    /// Change (°F) that must be exceeded before a new setpoint is committed
    pub setpoint_min_delta_f: f32,
    /// Setpoint at power-on (°F)
    pub initial_setpoint_f: f32,

    // --- Heater ---
    /// Dead-band above the setpoint before the heater is switched off (°F)
    pub heater_off_band_f: f32,
    /// Relay temperature that raises the alarm (°F)
    pub alarm_threshold_f: f32,
    /// Buzzer pulse length while the alarm holds (ms, blocking)
    pub alarm_pulse_ms: u32,

    // --- Inactivity ---
    /// Idle time before the backlight is switched off (ms)
    pub backlight_timeout_ms: u32,
    /// Idle time before a non-main screen reverts to main (ms)
    pub revert_timeout_ms: u32,

    // --- Date editor ---
    /// Calendar year corresponding to a mapped knob value of 0
    pub year_base: i32,

    // --- Timing ---
    /// Main loop poll interval (ms)
    pub poll_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Button
            debounce_ms: 50,
            long_press_ms: 3000,

            // Knob
            knob_noise_floor: 10,
            knob_min_interval_ms: 50,

            // Setpoint
            setpoint_min_delta_f: 0.5,
            initial_setpoint_f: 68.0,

            // Heater
            heater_off_band_f: 1.0,
            alarm_threshold_f: 90.0,
            alarm_pulse_ms: 1000,

            // Inactivity
            backlight_timeout_ms: 30_000,
            revert_timeout_ms: 10_000,

            // Date editor
            year_base: 2000,

            // Timing
            poll_interval_ms: 10, // 100 Hz
        }
    }
}

impl ControllerConfig {
    /// Parse a JSON override blob.  Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would make the UI or heater misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_ms >= self.long_press_ms {
            return Err(Error::Config("debounce must be shorter than long press"));
        }
        if !(TEMP_MIN_F..=TEMP_MAX_F).contains(&self.initial_setpoint_f) {
            return Err(Error::Config("initial setpoint outside 35-90 F"));
        }
        if self.setpoint_min_delta_f <= 0.0 || self.heater_off_band_f <= 0.0 {
            return Err(Error::Config("setpoint delta and heater band must be positive"));
        }
        if self.backlight_timeout_ms == 0 || self.revert_timeout_ms == 0 {
            return Err(Error::Config("inactivity timeouts must be non-zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero"));
        }
        Ok(())
    }
}
