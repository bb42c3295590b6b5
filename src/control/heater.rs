//! Heater hysteresis comparator and relay over-temperature alarm.
//!
//! ```text
//!            heater OFF edge
//!   room  ───────────────────  setpoint + 1.0 °F
//!             (dead-band)
//!   room  ───────────────────  setpoint
//!            heater ON edge
//! ```
//!
//! The dead-band sits only above the setpoint: heating starts as soon as the
//! room drops below the setpoint, but stops only once it overshoots by the
//! band.  Commands are edge-triggered (one per change of `on`).
//!
//! The relay alarm is level-triggered: it is reported on every evaluation
//! while the relay reads at or above the threshold.

use log::{info, warn};

use crate::config::ControllerConfig;

/// Outbound heater command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterCommand {
    On,
    Off,
}

impl HeaterCommand {
    /// Command name used on the radio link.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "HEATER_ON",
            Self::Off => "HEATER_OFF",
        }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaterOutput {
    /// Present only on an ON/OFF edge.
    pub command: Option<HeaterCommand>,
    /// Relay over-temperature this cycle.
    pub alarm: bool,
}

pub struct HeaterController {
    off_band_f: f32,
    alarm_threshold_f: f32,
    on: bool,
}

impl HeaterController {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            off_band_f: config.heater_off_band_f,
            alarm_threshold_f: config.alarm_threshold_f,
            on: false,
        }
    }

    /// Compare the room against the setpoint and check the relay.
    pub fn evaluate(&mut self, room_f: f32, setpoint_f: f32, relay_f: f32) -> HeaterOutput {
        let command = if room_f < setpoint_f && !self.on {
            self.on = true;
            info!("HEATER: on (room {room_f:.1} < set {setpoint_f:.1})");
            Some(HeaterCommand::On)
        } else if room_f > setpoint_f + self.off_band_f && self.on {
            self.on = false;
            info!(
                "HEATER: off (room {room_f:.1} > set {setpoint_f:.1} + {:.1})",
                self.off_band_f
            );
            Some(HeaterCommand::Off)
        } else {
            None
        };

        let alarm = relay_f >= self.alarm_threshold_f;
        if alarm {
            warn!("ALARM: relay at {relay_f:.1}\u{00b0}F");
        }

        HeaterOutput { command, alarm }
    }

    /// Whether the heater is currently commanded on.
    pub fn is_on(&self) -> bool {
        self.on
    }
}
