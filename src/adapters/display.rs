//! 16x2 character LCD layout.
//!
//! [`LcdDisplay`] turns a [`Frame`] into two fixed-width lines and hands
//! them to a [`LineWriter`] (the LCD controller, or the serial console on
//! boards without one).
//!
//! | Screen         | Line 0               | Line 1               |
//! |----------------|----------------------|----------------------|
//! | Main           | `03/07/2024 08:05`   | ` 70.0F  Set 68.0`   |
//! | HumidityTemp   | `Humidity  45.0%`    | `Temp      70.0F`    |
//! | EditDateTime   | `Set Month`          | `03/07/2024 08:05`   |
//! | SetTemperature | `Set Temperature`    | `Target    68.0F`    |
//!
//! While the relay alarm is active, line 0 of every screen is replaced by
//! `RELAY HOT  91.5F`.  Readings are clamped to the `{:5.1}` field width
//! (-99.9 ..= 999.9) so every line always fits 16 columns.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use log::info;

use crate::app::ports::Frame;
use crate::fsm::Screen;

pub const LCD_COLS: usize = 16;

pub type Line = heapless::String<LCD_COLS>;

/// Anything that can draw a [`Frame`].
pub trait DisplayDriver {
    fn show(&mut self, frame: &Frame);
}

/// Writes one already-formatted row.
pub trait LineWriter {
    fn write_line(&mut self, row: u8, text: &str);
}

/// Mirrors the LCD rows to the log.
pub struct LogLineWriter;

impl LineWriter for LogLineWriter {
    fn write_line(&mut self, row: u8, text: &str) {
        info!("LCD{} | {}", row, text);
    }
}

fn date_line(t: NaiveDateTime) -> Line {
    let mut line = Line::new();
    let _ = write!(
        line,
        "{:02}/{:02}/{:04} {:02}:{:02}",
        t.month(),
        t.day(),
        t.year(),
        t.hour(),
        t.minute()
    );
    line
}

/// Widest values a `{:5.1}` field can hold.
const FIELD_MIN: f32 = -99.9;
const FIELD_MAX: f32 = 999.9;

fn fit(v: f32) -> f32 {
    v.clamp(FIELD_MIN, FIELD_MAX)
}

/// Lay out both rows for `frame`.
pub fn compose(frame: &Frame) -> [Line; 2] {
    let mut top = Line::new();
    let mut bottom = Line::new();
    let room = fit(frame.room_f);
    match frame.screen {
        Screen::Main => {
            top = date_line(frame.time);
            let _ = write!(bottom, "{:5.1}F  Set{:5.1}", room, fit(frame.setpoint_f));
        }
        Screen::HumidityTemp => {
            let _ = write!(top, "Humidity {:5.1}%", fit(frame.humidity_pct));
            let _ = write!(bottom, "Temp     {:5.1}F", room);
        }
        Screen::EditDateTime => {
            let label = frame.field.map_or("", |f| f.label());
            let _ = write!(top, "Set {label}");
            bottom = date_line(frame.time);
        }
        Screen::SetTemperature => {
            let _ = top.push_str("Set Temperature");
            let _ = write!(bottom, "Target   {:5.1}F", fit(frame.setpoint_f));
        }
    }
    if frame.alarm {
        top.clear();
        let _ = write!(top, "RELAY HOT {:5.1}F", fit(frame.relay_f));
    }
    [top, bottom]
}

pub struct LcdDisplay<W> {
    writer: W,
}

impl<W: LineWriter> LcdDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: LineWriter> DisplayDriver for LcdDisplay<W> {
    fn show(&mut self, frame: &Frame) {
        for (row, line) in compose(frame).iter().enumerate() {
            self.writer.write_line(row as u8, line.as_str());
        }
    }
}
