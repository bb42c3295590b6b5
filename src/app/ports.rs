//! Port traits — the hexagonal boundary between the control core and the
//! panel hardware, radio and clock.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters implement these traits.  The
//! [`ControllerService`](super::service::ControllerService) consumes them via
//! generics, so the control core never touches a pin, ADC or radio directly.
//! None of the ports return errors: the core treats every input as always
//! available and every output as best-effort.

use chrono::NaiveDateTime;

use crate::control::heater::HeaterCommand;
use crate::editor::DateTimeField;
use crate::fsm::Screen;
use crate::fsm::context::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: pins → domain)
// ───────────────────────────────────────────────────────────────

/// Raw user-input samples.
pub trait InputPort {
    /// `true` while the button is held down (level, not edge).
    fn button_pressed(&mut self) -> bool;

    /// Raw knob potentiometer reading (nominally 10–1023).
    fn knob_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: sensors → domain)
// ───────────────────────────────────────────────────────────────

/// Room, humidity and relay readings.  Values may be stale; the core
/// applies no plausibility checks beyond the relay alarm threshold.
pub trait SensorPort {
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC / system time ↔ domain)
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Monotonic milliseconds since boot (wraps at `u32::MAX`).
    fn uptime_ms(&self) -> u32;

    /// Current wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Replace the wall-clock time (date/time editor commit).
    fn set_time(&mut self, time: NaiveDateTime);
}

// ───────────────────────────────────────────────────────────────
// Panel port (driven adapter: domain → display, backlight, buzzer)
// ───────────────────────────────────────────────────────────────

/// Everything the display needs to draw one screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub screen: Screen,
    pub setpoint_f: f32,
    pub room_f: f32,
    pub humidity_pct: f32,
    pub relay_f: f32,
    /// Wall-clock time, truncated to the minute.
    pub time: NaiveDateTime,
    /// Field being edited; only set on the `EditDateTime` screen.
    pub field: Option<DateTimeField>,
    /// Relay over-temperature warning.
    pub alarm: bool,
}

pub trait PanelPort {
    /// Draw `frame`.  Only called when the content is stale.
    fn render(&mut self, frame: &Frame);

    fn set_backlight(&mut self, on: bool);

    fn set_buzzer(&mut self, on: bool);

    /// Block for `ms` milliseconds (alarm pulse only).
    fn hold(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Command sink (driven adapter: domain → radio)
// ───────────────────────────────────────────────────────────────

/// Outbound heater commands.  Fire-and-forget: no acknowledgement, no retry.
pub trait CommandSink {
    fn send(&mut self, command: HeaterCommand, value: f32, timestamp: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`ControllerEvent`](super::events::ControllerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControllerEvent);
}
