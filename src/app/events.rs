//! Outbound controller events.
//!
//! The [`ControllerService`](super::service::ControllerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  The log adapter
//! writes them to the serial console.

use chrono::NaiveDateTime;

use crate::control::heater::HeaterCommand;
use crate::fsm::Screen;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// The service has started (carries the initial screen).
    Started(Screen),

    /// The screen FSM transitioned.
    ScreenChanged { from: Screen, to: Screen },

    /// A new setpoint was committed from the knob.
    SetpointChanged(f32),

    /// The date/time editor committed a new wall-clock time.
    ClockSet(NaiveDateTime),

    /// A heater command was handed to the radio.
    HeaterCommanded { command: HeaterCommand, setpoint_f: f32 },

    /// Relay temperature crossed the alarm threshold.
    AlarmRaised { relay_f: f32 },

    /// Relay temperature fell back below the alarm threshold.
    AlarmCleared,

    /// The backlight was switched on (wake) or off (idle).
    Backlight(bool),
}
