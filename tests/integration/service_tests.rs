//! Integration tests for the ControllerService poll pipeline.
//!
//! These run on the host (x86_64) and drive the service end to end:
//! raw button/knob samples in, screen changes, radio commands, backlight
//! and buzzer calls and display frames out.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use thermopanel::app::events::ControllerEvent;
use thermopanel::app::service::ControllerService;
use thermopanel::config::ControllerConfig;
use thermopanel::control::heater::HeaterCommand;
use thermopanel::editor::DateTimeField;
use thermopanel::fsm::Screen;
use thermopanel::mapping::map_temperature;

use crate::mock_hw::{MockPanel, MockRadio, PanelCall, RecordingSink};

struct Rig {
    svc: ControllerService,
    hw: MockPanel,
    radio: MockRadio,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// Started service after one priming poll at t = 10 ms.
    fn with_config(config: ControllerConfig) -> Self {
        let mut rig = Self {
            svc: ControllerService::new(&config),
            hw: MockPanel::new(),
            radio: MockRadio::default(),
            sink: RecordingSink::default(),
        };
        rig.svc.start(&mut rig.hw, &mut rig.sink);
        rig.tick(10);
        rig
    }

    fn tick(&mut self, dt_ms: u32) {
        self.hw.uptime_ms = self.hw.uptime_ms.wrapping_add(dt_ms);
        self.svc.poll(&mut self.hw, &mut self.radio, &mut self.sink);
    }

    /// Press, hold for `held_ms`, release.
    fn press(&mut self, held_ms: u32) {
        self.hw.pressed = true;
        self.tick(10);
        self.hw.pressed = false;
        self.tick(held_ms);
    }

    fn turn(&mut self, raw: u16) {
        self.hw.knob = raw;
        self.tick(100);
    }

    fn darken(&mut self) {
        self.tick(30_001);
        assert!(!self.svc.backlight_on());
    }
}

fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_lights_panel_and_renders_main() {
    let rig = Rig::new();
    assert_eq!(rig.sink.events[0], ControllerEvent::Started(Screen::Main));
    assert_eq!(rig.hw.backlight_on(), Some(true));
    assert_eq!(rig.hw.render_count(), 1);

    let frame = rig.hw.last_render().unwrap();
    assert_eq!(frame.screen, Screen::Main);
    assert_eq!(frame.setpoint_f, 68.0);
    assert_eq!(frame.time, date(2024, 3, 7, 8, 5));
    assert_eq!(frame.field, None);
    assert_eq!(rig.svc.poll_count(), 1);
}

#[test]
fn resting_knob_at_boot_is_not_a_movement() {
    let mut rig = Rig::new();
    rig.tick(100);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(rig.svc.setpoint(), 68.0);
}

// ── Button navigation ─────────────────────────────────────────

#[test]
fn short_press_toggles_main_and_humidity() {
    let mut rig = Rig::new();
    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);
    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(
        rig.sink.screen_changes(),
        vec![
            (Screen::Main, Screen::HumidityTemp),
            (Screen::HumidityTemp, Screen::Main)
        ]
    );
}

#[test]
fn bounce_is_ignored() {
    let mut rig = Rig::new();
    rig.press(30);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert!(rig.sink.screen_changes().is_empty());
}

#[test]
fn long_press_opens_editor_from_main_and_humidity() {
    let mut rig = Rig::new();
    rig.press(3000);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    assert_eq!(rig.hw.last_render().unwrap().field, Some(DateTimeField::Month));

    let mut rig = Rig::new();
    rig.press(100);
    rig.press(3500);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
}

#[test]
fn short_press_leaves_set_temperature() {
    let mut rig = Rig::new();
    rig.turn(300);
    assert_eq!(rig.svc.screen(), Screen::SetTemperature);
    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::Main);
}

// ── Knob → setpoint → heater ──────────────────────────────────

#[test]
fn knob_on_main_sets_temperature_and_drives_heater() {
    let mut rig = Rig::new();
    rig.turn(300);

    let expected = map_temperature(300);
    assert_eq!(rig.svc.screen(), Screen::SetTemperature);
    assert!((rig.svc.setpoint() - expected).abs() < 1e-4);
    assert!(rig.sink.events.contains(&ControllerEvent::SetpointChanged(rig.svc.setpoint())));

    // Room 70 is now below the setpoint.
    assert!(rig.svc.heater_on());
    assert_eq!(rig.radio.sent.len(), 1);
    let (command, value, stamp) = &rig.radio.sent[0];
    assert_eq!(*command, HeaterCommand::On);
    assert!((value - expected).abs() < 1e-4);
    assert_eq!(stamp, "2024-03-07 08:05:00");
}

#[test]
fn knob_on_set_temperature_keeps_screen() {
    let mut rig = Rig::new();
    rig.turn(300);
    rig.turn(280);
    assert_eq!(rig.svc.screen(), Screen::SetTemperature);
    assert!((rig.svc.setpoint() - map_temperature(280)).abs() < 1e-4);
    assert_eq!(
        rig.sink.count(|e| matches!(e, ControllerEvent::SetpointChanged(_))),
        2
    );
}

#[test]
fn small_knob_jitter_is_ignored() {
    let mut rig = Rig::new();
    rig.turn(505);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(rig.svc.setpoint(), 68.0);
}

#[test]
fn heater_hysteresis_emits_exactly_two_commands() {
    let config = ControllerConfig {
        initial_setpoint_f: 70.0,
        ..ControllerConfig::default()
    };
    let mut rig = Rig::with_config(config);

    for room in [69.0, 69.5, 71.5, 71.2] {
        rig.hw.sensors.room_f = room;
        rig.tick(10);
    }

    let commands: Vec<_> = rig.radio.sent.iter().map(|(c, v, _)| (*c, *v)).collect();
    assert_eq!(commands, vec![(HeaterCommand::On, 70.0), (HeaterCommand::Off, 70.0)]);
    assert!(!rig.svc.heater_on());
}

// ── Alarm ─────────────────────────────────────────────────────

#[test]
fn buzzer_pulses_every_alarm_poll_and_clears_once() {
    let mut rig = Rig::new();
    rig.hw.sensors.relay_f = 90.0;
    for _ in 0..3 {
        rig.tick(10);
    }
    assert!(rig.svc.alarm_active());
    assert_eq!(rig.hw.count(&PanelCall::Buzzer(true)), 3);
    assert_eq!(rig.hw.count(&PanelCall::Hold(1000)), 3);
    assert!(rig.hw.last_render().unwrap().alarm);
    assert_eq!(
        rig.sink.count(|e| matches!(e, ControllerEvent::AlarmRaised { .. })),
        1
    );

    rig.hw.sensors.relay_f = 80.0;
    rig.tick(10);
    rig.tick(10);
    assert!(!rig.svc.alarm_active());
    assert_eq!(rig.hw.count(&PanelCall::Buzzer(false)), 1);
    assert_eq!(rig.sink.count(|e| *e == ControllerEvent::AlarmCleared), 1);
    assert!(!rig.hw.last_render().unwrap().alarm);
}

#[test]
fn alarm_is_independent_of_screen() {
    let mut rig = Rig::new();
    rig.press(100);
    rig.hw.sensors.relay_f = 95.0;
    rig.tick(10);
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);
    assert_eq!(rig.hw.count(&PanelCall::Buzzer(true)), 1);
}

// ── Inactivity ────────────────────────────────────────────────

#[test]
fn idle_humidity_screen_reverts_after_ten_seconds() {
    let mut rig = Rig::new();
    rig.press(100);
    rig.tick(10_000);
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);
    rig.tick(1);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(
        rig.sink.screen_changes().last(),
        Some(&(Screen::HumidityTemp, Screen::Main))
    );
}

#[test]
fn idle_revert_abandons_date_edit() {
    let mut rig = Rig::new();
    rig.press(3000);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    rig.tick(10_001);
    assert_eq!(rig.svc.screen(), Screen::Main);
}

#[test]
fn editor_stays_open_ten_seconds_after_long_press_release() {
    let mut rig = Rig::new();
    rig.press(3_500);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    rig.tick(10_000);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    rig.tick(1);
    assert_eq!(rig.svc.screen(), Screen::Main);
}

#[test]
fn held_button_is_never_idle() {
    let mut rig = Rig::new();
    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);

    rig.hw.pressed = true;
    for _ in 0..35 {
        rig.tick(1_000);
    }
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);
    assert!(rig.svc.backlight_on());

    rig.hw.pressed = false;
    rig.tick(10);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    assert!(rig.svc.backlight_on());
}

#[test]
fn backlight_turns_off_after_thirty_seconds_on_main() {
    let mut rig = Rig::new();
    rig.darken();
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(rig.hw.backlight_on(), Some(false));
    assert!(rig.sink.events.contains(&ControllerEvent::Backlight(false)));
    assert!(rig.sink.screen_changes().is_empty());
}

#[test]
fn wake_press_only_lights_the_panel() {
    let mut rig = Rig::new();
    rig.darken();

    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(rig.hw.backlight_on(), Some(true));
    assert!(rig.sink.events.contains(&ControllerEvent::Backlight(true)));

    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::HumidityTemp);
}

#[test]
fn wake_knob_turn_is_consumed() {
    let mut rig = Rig::new();
    rig.darken();

    rig.turn(300);
    assert_eq!(rig.svc.screen(), Screen::Main);
    assert_eq!(rig.svc.setpoint(), 68.0);
    assert!(rig.svc.backlight_on());

    rig.turn(200);
    assert_eq!(rig.svc.screen(), Screen::SetTemperature);
}

// ── Display refresh ───────────────────────────────────────────

#[test]
fn display_renders_only_on_change() {
    let mut rig = Rig::new();
    for _ in 0..5 {
        rig.tick(10);
    }
    assert_eq!(rig.hw.render_count(), 1);

    rig.hw.sensors.room_f = 71.0;
    rig.tick(10);
    assert_eq!(rig.hw.render_count(), 2);

    // Below display resolution.
    rig.hw.sensors.room_f = 71.02;
    rig.tick(10);
    assert_eq!(rig.hw.render_count(), 2);

    rig.hw.wall += TimeDelta::seconds(30);
    rig.tick(10);
    assert_eq!(rig.hw.render_count(), 2);

    rig.hw.wall += TimeDelta::seconds(30);
    rig.tick(10);
    assert_eq!(rig.hw.render_count(), 3);
    assert_eq!(rig.hw.last_render().unwrap().time, date(2024, 3, 7, 8, 6));
}

#[test]
fn every_transition_redraws() {
    let mut rig = Rig::new();
    rig.press(100);
    assert_eq!(rig.hw.last_render().unwrap().screen, Screen::HumidityTemp);
    rig.press(100);
    assert_eq!(rig.hw.last_render().unwrap().screen, Screen::Main);
    assert_eq!(rig.hw.render_count(), 3);
}

// ── Date/time editor ──────────────────────────────────────────

#[test]
fn editor_commits_month_then_day() {
    let mut rig = Rig::new();
    rig.press(3000);

    // Component 5 → May.
    rig.turn(972);
    assert_eq!(rig.hw.time_sets, vec![date(2024, 5, 7, 8, 5)]);
    assert!(rig.sink.events.contains(&ControllerEvent::ClockSet(date(2024, 5, 7, 8, 5))));
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);

    rig.press(100);
    assert_eq!(rig.svc.screen(), Screen::EditDateTime);
    assert_eq!(rig.hw.last_render().unwrap().field, Some(DateTimeField::Day));

    // Component 100 → clamped to 31.
    rig.turn(10);
    assert_eq!(rig.hw.time_sets.last(), Some(&date(2024, 5, 31, 8, 5)));
    assert_eq!(rig.hw.wall, date(2024, 5, 31, 8, 5));
}

#[test]
fn editor_clamps_month_to_twelve() {
    let mut rig = Rig::new();
    rig.press(3000);
    rig.turn(10);
    assert_eq!(rig.hw.time_sets, vec![date(2024, 12, 7, 8, 5)]);
}

#[test]
fn editor_day_respects_month_length() {
    let mut rig = Rig::new();
    rig.hw.wall = date(2023, 2, 10, 12, 0);
    rig.press(3000);
    rig.press(100);
    rig.turn(10);
    assert_eq!(rig.hw.time_sets, vec![date(2023, 2, 28, 12, 0)]);
}

#[test]
fn editor_does_not_touch_setpoint_or_heater() {
    let mut rig = Rig::new();
    rig.press(3000);
    rig.turn(10);
    assert_eq!(rig.svc.setpoint(), 68.0);
    assert!(rig.radio.sent.is_empty());
}
