//! Controller service — the hexagonal core.
//!
//! [`ControllerService`] owns every piece of controller state: the input
//! classifiers, the screen FSM and its context, the inactivity monitor and
//! the heater comparator.  All I/O flows through port traits injected at
//! call sites, making the whole poll cycle testable with mock adapters.
//!
//! ```text
//!   InputPort  ──▶ ┌──────────────────────────────┐ ──▶ PanelPort
//!   SensorPort ──▶ │      ControllerService       │ ──▶ CommandSink
//!   ClockPort  ◀─▶ │ Button · Knob · FSM · Heater │ ──▶ EventSink
//!                  └──────────────────────────────┘
//! ```

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use log::info;

use crate::config::ControllerConfig;
use crate::control::heater::HeaterController;
use crate::fsm::context::UiContext;
use crate::fsm::screens::build_screen_table;
use crate::fsm::{Screen, ScreenMachine, UiInput};
use crate::inactivity::{ActivityClock, InactivityAction, InactivityMonitor};
use crate::input::{ButtonClassifier, KnobTracker, PressEvent};

use super::events::ControllerEvent;
use super::ports::{ClockPort, CommandSink, EventSink, Frame, InputPort, PanelPort, SensorPort};

/// `YYYY-MM-DD HH:MM:SS`
pub type Timestamp = heapless::String<20>;

/// Format a wall-clock time for the radio link.
pub fn format_timestamp(t: NaiveDateTime) -> Timestamp {
    let mut buf = Timestamp::new();
    let _ = write!(
        buf,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second()
    );
    buf
}

/// Round to the display resolution (0.1).
fn round_tenth(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

pub struct ControllerService {
    fsm: ScreenMachine,
    ctx: UiContext,
    button: ButtonClassifier,
    knob: KnobTracker,
    activity: ActivityClock,
    inactivity: InactivityMonitor,
    heater: HeaterController,
    alarm_pulse_ms: u32,
    /// Backlight state last written to the panel.
    backlight_applied: bool,
    alarm_active: bool,
    /// Last frame handed to the display.
    last_frame: Option<Frame>,
    poll_count: u64,
}

impl ControllerService {
    /// Construct the service.  Call [`start`](Self::start) before polling.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            fsm: ScreenMachine::new(build_screen_table(), Screen::Main),
            ctx: UiContext::new(config),
            button: ButtonClassifier::new(config),
            knob: KnobTracker::new(config),
            activity: ActivityClock::new(0),
            inactivity: InactivityMonitor::new(config),
            heater: HeaterController::new(config),
            alarm_pulse_ms: config.alarm_pulse_ms,
            backlight_applied: true,
            alarm_active: false,
            last_frame: None,
            poll_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Light the panel and enter the main screen.
    pub fn start(&mut self, hw: &mut (impl ClockPort + PanelPort), sink: &mut impl EventSink) {
        self.activity = ActivityClock::new(hw.uptime_ms());
        self.ctx.now = hw.now();
        self.fsm.start(&mut self.ctx);
        hw.set_backlight(true);
        self.backlight_applied = true;
        sink.emit(&ControllerEvent::Started(self.fsm.current_screen()));
        info!("ControllerService started on {:?}", self.fsm.current_screen());
    }

    // ── Per-poll orchestration ────────────────────────────────

    /// Run one poll cycle:
    /// inputs → classifiers → FSM → inactivity → clock → heater → display.
    pub fn poll(
        &mut self,
        hw: &mut (impl InputPort + SensorPort + ClockPort + PanelPort),
        radio: &mut impl CommandSink,
        sink: &mut impl EventSink,
    ) {
        self.poll_count += 1;

        // 1. Refresh the blackboard
        let now_ms = hw.uptime_ms();
        self.ctx.now = hw.now();
        self.ctx.sensors = hw.read_all();

        // 2. Classify raw inputs (records activity, may wake the backlight)
        let press = self.button.poll(hw.button_pressed(), now_ms, &mut self.activity);
        let movement = self.knob.poll(hw.knob_raw(), now_ms, &mut self.activity);
        self.sync_backlight(hw, sink);

        // 3. Screen FSM
        let setpoint_before = self.ctx.setpoint.current();
        match press {
            PressEvent::Short => self.dispatch(UiInput::ShortPress, sink),
            PressEvent::Long => self.dispatch(UiInput::LongPress, sink),
            PressEvent::None => {}
        }
        if let Some(movement) = movement {
            self.dispatch(UiInput::Knob(movement), sink);
        }
        let setpoint = self.ctx.setpoint.current();
        if (setpoint - setpoint_before).abs() > f32::EPSILON {
            sink.emit(&ControllerEvent::SetpointChanged(setpoint));
        }

        // 4. Inactivity timeouts (a held button is not idle)
        let action = if self.button.is_pressed() {
            InactivityAction::default()
        } else {
            self.inactivity.poll(now_ms, self.fsm.current_screen(), &self.activity)
        };
        if action.revert_to_main {
            info!("Idle for {} ms, reverting to main", self.activity.idle_ms(now_ms));
            self.dispatch(UiInput::IdleTimeout, sink);
        }
        if action.turn_off_backlight {
            self.activity.darken();
        }
        self.sync_backlight(hw, sink);

        // 5. Commit a date/time edit
        if let Some(time) = self.ctx.take_time_commit() {
            hw.set_time(time);
            sink.emit(&ControllerEvent::ClockSet(time));
        }

        // 6. Heater + alarm (independent of the screen)
        self.regulate(hw, radio, sink);

        // 7. Display
        self.refresh_display(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Snapshot of what the display should currently show.
    pub fn frame(&self) -> Frame {
        let screen = self.fsm.current_screen();
        let snap = &self.ctx.sensors;
        Frame {
            screen,
            setpoint_f: round_tenth(self.ctx.setpoint.current()),
            room_f: round_tenth(snap.room_f),
            humidity_pct: round_tenth(snap.humidity_pct),
            relay_f: round_tenth(snap.relay_f),
            time: self
                .ctx
                .now
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(self.ctx.now),
            field: (screen == Screen::EditDateTime).then(|| self.ctx.editor.field()),
            alarm: self.alarm_active,
        }
    }

    pub fn screen(&self) -> Screen {
        self.fsm.current_screen()
    }

    pub fn setpoint(&self) -> f32 {
        self.ctx.setpoint.current()
    }

    pub fn heater_on(&self) -> bool {
        self.heater.is_on()
    }

    pub fn backlight_on(&self) -> bool {
        self.activity.backlight_on()
    }

    pub fn alarm_active(&self) -> bool {
        self.alarm_active
    }

    /// Poll cycles executed since startup.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(&mut self, input: UiInput, sink: &mut impl EventSink) {
        if let Some((from, to)) = self.fsm.dispatch(input, &mut self.ctx) {
            sink.emit(&ControllerEvent::ScreenChanged { from, to });
        }
    }

    /// Push a backlight change (wake or idle-off) to the panel.
    fn sync_backlight(&mut self, hw: &mut impl PanelPort, sink: &mut impl EventSink) {
        let on = self.activity.backlight_on();
        if on != self.backlight_applied {
            hw.set_backlight(on);
            self.backlight_applied = on;
            sink.emit(&ControllerEvent::Backlight(on));
        }
    }

    /// Heater edges go to the radio; the alarm pulses the buzzer every
    /// cycle it holds and clears it once the relay cools down.
    fn regulate(
        &mut self,
        hw: &mut impl PanelPort,
        radio: &mut impl CommandSink,
        sink: &mut impl EventSink,
    ) {
        let snap = self.ctx.sensors;
        let setpoint = self.ctx.setpoint.current();
        let out = self.heater.evaluate(snap.room_f, setpoint, snap.relay_f);

        if let Some(command) = out.command {
            let stamp = format_timestamp(self.ctx.now);
            radio.send(command, setpoint, stamp.as_str());
            sink.emit(&ControllerEvent::HeaterCommanded {
                command,
                setpoint_f: setpoint,
            });
        }

        if out.alarm {
            if !self.alarm_active {
                self.alarm_active = true;
                sink.emit(&ControllerEvent::AlarmRaised {
                    relay_f: snap.relay_f,
                });
            }
            hw.set_buzzer(true);
            hw.hold(self.alarm_pulse_ms);
        } else if self.alarm_active {
            self.alarm_active = false;
            hw.set_buzzer(false);
            sink.emit(&ControllerEvent::AlarmCleared);
        }
    }

    /// Render only when a redraw was requested or the visible content changed.
    fn refresh_display(&mut self, hw: &mut impl PanelPort) {
        let frame = self.frame();
        let requested = self.ctx.take_redraw();
        if requested || self.last_frame != Some(frame) {
            hw.render(&frame);
            self.last_frame = Some(frame);
        }
    }
}
