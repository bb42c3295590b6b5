//! Heater radio link.
//!
//! Heater commands travel to the relay as one ASCII line,
//! `<command>:<temp>:<datetime>`, e.g. `HEATER_ON:68.0:2024-03-07 08:05:09`.
//! There is no acknowledgement and no retry.  [`LogRadio`] encodes the line
//! and writes it to the console in place of the transceiver.

use core::fmt::Write;

use log::{info, warn};

use crate::app::ports::CommandSink;
use crate::control::heater::HeaterCommand;

/// Longest payload: `HEATER_OFF:-100.0:YYYY-MM-DD HH:MM:SS` plus headroom.
pub type Payload = heapless::String<48>;

/// Encode one radio payload.  Returns `None` if it does not fit.
pub fn encode(command: HeaterCommand, value: f32, timestamp: &str) -> Option<Payload> {
    let mut buf = Payload::new();
    write!(buf, "{}:{:.1}:{}", command.as_str(), value, timestamp).ok()?;
    Some(buf)
}

/// Console stand-in for the radio transceiver.
#[derive(Default)]
pub struct LogRadio {
    sent: u32,
}

impl LogRadio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads sent since boot.
    pub fn sent(&self) -> u32 {
        self.sent
    }
}

impl CommandSink for LogRadio {
    fn send(&mut self, command: HeaterCommand, value: f32, timestamp: &str) {
        match encode(command, value, timestamp) {
            Some(payload) => {
                self.sent = self.sent.wrapping_add(1);
                info!("RADIO | {}", payload);
            }
            None => warn!("RADIO | payload for {} too long, dropped", command.as_str()),
        }
    }
}
