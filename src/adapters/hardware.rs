//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the panel's pins and collaborators and exposes them through
//! [`InputPort`], [`SensorPort`], [`ClockPort`] and [`PanelPort`].  This is
//! the only module in the system that touches actual hardware.  Pins are
//! taken as `embedded-hal` 1.0 traits, so the same adapter runs on
//! `esp-idf-hal` drivers and on host test doubles.
//!
//! HAL errors never reach the core.  They are logged and degraded: a failed
//! button read counts as released, a failed knob read repeats the last value.

use chrono::NaiveDateTime;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use super::display::DisplayDriver;
use crate::app::ports::{ClockPort, Frame, InputPort, PanelPort, SensorPort};
use crate::error::HardwareError;
use crate::fsm::context::SensorSnapshot;

/// One-shot analog channel (knob potentiometer, thermistor divider).
pub trait AnalogSource {
    fn read_raw(&mut self) -> Result<u16, HardwareError>;
}

/// Panel pins plus the display, sensor and clock collaborators.
pub struct PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk> {
    /// Active-low push-button.
    button: Btn,
    backlight: Out,
    buzzer: Out,
    delay: Dly,
    knob: Knob,
    sensors: Sens,
    display: Disp,
    clock: Clk,
    last_knob: u16,
}

impl<Btn, Out, Dly, Knob, Sens, Disp, Clk> PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk>
where
    Btn: InputPin,
    Out: OutputPin,
    Dly: DelayNs,
    Knob: AnalogSource,
    Sens: SensorPort,
    Disp: DisplayDriver,
    Clk: ClockPort,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        button: Btn,
        backlight: Out,
        buzzer: Out,
        delay: Dly,
        knob: Knob,
        sensors: Sens,
        display: Disp,
        clock: Clk,
    ) -> Self {
        Self {
            button,
            backlight,
            buzzer,
            delay,
            knob,
            sensors,
            display,
            clock,
            last_knob: 0,
        }
    }

    /// Mutable access to the sensor collaborator (humidity / relay updates).
    pub fn sensors_mut(&mut self) -> &mut Sens {
        &mut self.sensors
    }

    pub fn display(&self) -> &Disp {
        &self.display
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool, what: &str) {
    let res = if on { pin.set_high() } else { pin.set_low() };
    if res.is_err() {
        warn!(
            "hw: {what} {} ({})",
            if on { "on" } else { "off" },
            HardwareError::GpioWriteFailed
        );
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<Btn, Out, Dly, Knob, Sens, Disp, Clk> InputPort
    for PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk>
where
    Btn: InputPin,
    Knob: AnalogSource,
{
    fn button_pressed(&mut self) -> bool {
        match self.button.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("hw: button ({}), treating as released", HardwareError::GpioReadFailed);
                false
            }
        }
    }

    fn knob_raw(&mut self) -> u16 {
        match self.knob.read_raw() {
            Ok(raw) => self.last_knob = raw,
            Err(e) => warn!("hw: knob ({e}), repeating {}", self.last_knob),
        }
        self.last_knob
    }
}

// ── SensorPort / ClockPort delegation ─────────────────────────

impl<Btn, Out, Dly, Knob, Sens, Disp, Clk> SensorPort
    for PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk>
where
    Sens: SensorPort,
{
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensors.read_all()
    }
}

impl<Btn, Out, Dly, Knob, Sens, Disp, Clk> ClockPort
    for PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk>
where
    Clk: ClockPort,
{
    fn uptime_ms(&self) -> u32 {
        self.clock.uptime_ms()
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn set_time(&mut self, time: NaiveDateTime) {
        self.clock.set_time(time);
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl<Btn, Out, Dly, Knob, Sens, Disp, Clk> PanelPort
    for PanelHardware<Btn, Out, Dly, Knob, Sens, Disp, Clk>
where
    Out: OutputPin,
    Dly: DelayNs,
    Disp: DisplayDriver,
{
    fn render(&mut self, frame: &Frame) {
        self.display.show(frame);
    }

    fn set_backlight(&mut self, on: bool) {
        drive(&mut self.backlight, on, "backlight");
    }

    fn set_buzzer(&mut self, on: bool) {
        drive(&mut self.buzzer, on, "buzzer");
    }

    fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
