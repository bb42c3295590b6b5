//! Concrete screen handler functions and table builder.
//!
//! ```text
//!   MAIN ──[short]──▶ HUMIDITY/TEMP ──[short]──▶ MAIN
//!     │                     │
//!   [knob]               [knob]
//!     ▼                     ▼
//!   SET TEMPERATURE ◀───────┘ ──[short]──▶ MAIN
//!
//!  Any screen ──[long press]──▶ EDIT DATE/TIME  (short cycles field)
//!  Any non-main ──[idle 10 s]──▶ MAIN
//! ```

use super::context::UiContext;
use super::{Screen, ScreenDescriptor, UiInput};
use crate::input::KnobMovement;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static screen table.  Called once at startup.
pub fn build_screen_table() -> [ScreenDescriptor; Screen::COUNT] {
    [
        // Index 0 — Main
        ScreenDescriptor {
            id: Screen::Main,
            name: "Main",
            on_enter: Some(redraw_enter),
            on_exit: None,
            on_input: main_input,
        },
        // Index 1 — HumidityTemp
        ScreenDescriptor {
            id: Screen::HumidityTemp,
            name: "HumidityTemp",
            on_enter: Some(redraw_enter),
            on_exit: None,
            on_input: humidity_input,
        },
        // Index 2 — EditDateTime
        ScreenDescriptor {
            id: Screen::EditDateTime,
            name: "EditDateTime",
            on_enter: Some(edit_enter),
            on_exit: None,
            on_input: edit_input,
        },
        // Index 3 — SetTemperature
        ScreenDescriptor {
            id: Screen::SetTemperature,
            name: "SetTemperature",
            on_enter: Some(redraw_enter),
            on_exit: None,
            on_input: set_temperature_input,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared
// ═══════════════════════════════════════════════════════════════════════════

fn redraw_enter(ctx: &mut UiContext) {
    ctx.request_redraw();
}

/// Transitions that apply on every screen.
fn global_transition(input: UiInput) -> Option<Screen> {
    match input {
        UiInput::LongPress => Some(Screen::EditDateTime),
        UiInput::IdleTimeout => Some(Screen::Main),
        _ => None,
    }
}

/// Knob edit of the setpoint.  Redraws only when the value was committed.
fn edit_setpoint(ctx: &mut UiContext, movement: KnobMovement) {
    if ctx.setpoint.apply_knob(movement.temperature()) {
        ctx.request_redraw();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  MAIN and HUMIDITY/TEMP — read-only screens
// ═══════════════════════════════════════════════════════════════════════════

fn main_input(ctx: &mut UiContext, input: UiInput) -> Option<Screen> {
    match input {
        UiInput::ShortPress => Some(Screen::HumidityTemp),
        UiInput::Knob(movement) => {
            // The turn that opens the setpoint screen also sets the value.
            edit_setpoint(ctx, movement);
            Some(Screen::SetTemperature)
        }
        other => global_transition(other),
    }
}

fn humidity_input(ctx: &mut UiContext, input: UiInput) -> Option<Screen> {
    match input {
        UiInput::ShortPress => Some(Screen::Main),
        UiInput::Knob(movement) => {
            edit_setpoint(ctx, movement);
            Some(Screen::SetTemperature)
        }
        other => global_transition(other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  EDIT DATE/TIME
// ═══════════════════════════════════════════════════════════════════════════

fn edit_enter(ctx: &mut UiContext) {
    ctx.editor.begin();
    ctx.request_redraw();
}

fn edit_input(ctx: &mut UiContext, input: UiInput) -> Option<Screen> {
    match input {
        UiInput::ShortPress => {
            ctx.editor.cycle_field();
            ctx.request_redraw();
            None
        }
        UiInput::Knob(movement) => {
            let now = ctx.now;
            if let Some(edited) = ctx.editor.apply_knob(movement.date_component(), now) {
                ctx.commit_time(edited);
                ctx.request_redraw();
            }
            None
        }
        other => global_transition(other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SET TEMPERATURE
// ═══════════════════════════════════════════════════════════════════════════

fn set_temperature_input(ctx: &mut UiContext, input: UiInput) -> Option<Screen> {
    match input {
        UiInput::ShortPress => Some(Screen::Main),
        UiInput::Knob(movement) => {
            edit_setpoint(ctx, movement);
            None
        }
        other => global_transition(other),
    }
}
