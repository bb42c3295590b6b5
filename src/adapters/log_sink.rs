//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::Started(screen) => {
                info!("START | initial_screen={:?}", screen);
            }
            ControllerEvent::ScreenChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            ControllerEvent::SetpointChanged(f) => {
                info!("SETPT | {:.1}\u{00b0}F", f);
            }
            ControllerEvent::ClockSet(t) => {
                info!("CLOCK | {}", t);
            }
            ControllerEvent::HeaterCommanded { command, setpoint_f } => {
                info!("HEAT  | {} @ {:.1}\u{00b0}F", command.as_str(), setpoint_f);
            }
            ControllerEvent::AlarmRaised { relay_f } => {
                warn!("ALARM | relay at {:.1}\u{00b0}F", relay_f);
            }
            ControllerEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            ControllerEvent::Backlight(on) => {
                info!("LIGHT | {}", if *on { "on" } else { "off" });
            }
        }
    }
}
