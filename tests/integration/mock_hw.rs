//! Mock panel hardware for integration tests.
//!
//! Inputs (button level, knob, sensors, clock) are plain public fields the
//! test sets between polls.  Every panel output is recorded so tests can
//! assert on the full call history without touching real pins.

use chrono::{NaiveDate, NaiveDateTime};
use thermopanel::app::events::ControllerEvent;
use thermopanel::app::ports::{
    ClockPort, CommandSink, EventSink, Frame, InputPort, PanelPort, SensorPort,
};
use thermopanel::control::heater::HeaterCommand;
use thermopanel::fsm::context::SensorSnapshot;

// ── Panel call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    Render(Frame),
    Backlight(bool),
    Buzzer(bool),
    Hold(u32),
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    pub pressed: bool,
    pub knob: u16,
    pub sensors: SensorSnapshot,
    pub uptime_ms: u32,
    pub wall: NaiveDateTime,
    pub time_sets: Vec<NaiveDateTime>,
    pub calls: Vec<PanelCall>,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self {
            pressed: false,
            knob: 500,
            sensors: SensorSnapshot {
                room_f: 70.0,
                humidity_pct: 40.0,
                relay_f: 75.0,
            },
            uptime_ms: 0,
            wall: NaiveDate::from_ymd_opt(2024, 3, 7)
                .and_then(|d| d.and_hms_opt(8, 5, 0))
                .unwrap(),
            time_sets: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn renders(&self) -> Vec<&Frame> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PanelCall::Render(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn render_count(&self) -> usize {
        self.renders().len()
    }

    pub fn last_render(&self) -> Option<&Frame> {
        self.renders().last().copied()
    }

    pub fn backlight_on(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            PanelCall::Backlight(on) => Some(*on),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &PanelCall) -> usize {
        self.calls.iter().filter(|c| *c == wanted).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockPanel {
    fn button_pressed(&mut self) -> bool {
        self.pressed
    }

    fn knob_raw(&mut self) -> u16 {
        self.knob
    }
}

impl SensorPort for MockPanel {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensors
    }
}

impl ClockPort for MockPanel {
    fn uptime_ms(&self) -> u32 {
        self.uptime_ms
    }

    fn now(&self) -> NaiveDateTime {
        self.wall
    }

    fn set_time(&mut self, time: NaiveDateTime) {
        self.wall = time;
        self.time_sets.push(time);
    }
}

impl PanelPort for MockPanel {
    fn render(&mut self, frame: &Frame) {
        self.calls.push(PanelCall::Render(*frame));
    }

    fn set_backlight(&mut self, on: bool) {
        self.calls.push(PanelCall::Backlight(on));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(PanelCall::Buzzer(on));
    }

    fn hold(&mut self, ms: u32) {
        self.calls.push(PanelCall::Hold(ms));
    }
}

// ── MockRadio ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRadio {
    pub sent: Vec<(HeaterCommand, f32, String)>,
}

impl CommandSink for MockRadio {
    fn send(&mut self, command: HeaterCommand, value: f32, timestamp: &str) {
        self.sent.push((command, value, timestamp.to_string()));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControllerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn screen_changes(&self) -> Vec<(thermopanel::fsm::Screen, thermopanel::fsm::Screen)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::ScreenChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&ControllerEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControllerEvent) {
        self.events.push(event.clone());
    }
}
