//! Function-pointer finite state machine for the panel screens.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  ScreenTable                                                  │
//! │  ┌────────────────┬───────────┬──────────┬─────────────────┐  │
//! │  │ Screen         │ on_enter  │ on_exit  │ on_input        │  │
//! │  ├────────────────┼───────────┼──────────┼─────────────────┤  │
//! │  │ Main           │ fn(ctx)   │ -        │ fn(ctx, input)  │  │
//! │  │ HumidityTemp   │ fn(ctx)   │ -        │ fn(ctx, input)  │  │
//! │  │ EditDateTime   │ fn(ctx)   │ -        │ fn(ctx, input)  │  │
//! │  │ SetTemperature │ fn(ctx)   │ -        │ fn(ctx, input)  │  │
//! │  └────────────────┴───────────┴──────────┴─────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each classified input is handed to `on_input` of the **current** screen.
//! If it returns `Some(next)` and `next` differs from the current screen,
//! the engine runs `on_exit` for the current screen, then `on_enter` for the
//! next.  Re-entering the current screen is a no-op.  All handlers receive
//! `&mut UiContext`, which holds the setpoint, the date editor, the latest
//! readings and the redraw flag.

pub mod context;
pub mod screens;

use context::UiContext;
use log::info;

use crate::input::KnobMovement;

// ---------------------------------------------------------------------------
// Screen identity
// ---------------------------------------------------------------------------

/// Every screen the panel can show.  Also the FSM state identity.
/// Must stay in sync with the table built in [`screens::build_screen_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Screen {
    Main = 0,
    HumidityTemp = 1,
    EditDateTime = 2,
    SetTemperature = 3,
}

impl Screen {
    /// Total number of screens — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert a table index back to `Screen`.  Panics on out-of-range in
    /// debug builds; returns `Main` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Main,
            1 => Self::HumidityTemp,
            2 => Self::EditDateTime,
            3 => Self::SetTemperature,
            _ => {
                debug_assert!(false, "invalid screen index: {idx}");
                Self::Main
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Already-classified input delivered to the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiInput {
    ShortPress,
    LongPress,
    Knob(KnobMovement),
    /// The inactivity monitor's revert timeout expired.
    IdleTimeout,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type ScreenActionFn = fn(&mut UiContext);

/// Signature for the per-input handler.
/// Returns `Some(next)` to request a transition, or `None` to stay.
pub type ScreenInputFn = fn(&mut UiContext, UiInput) -> Option<Screen>;

/// Static descriptor for a single screen.
pub struct ScreenDescriptor {
    pub id: Screen,
    pub name: &'static str,
    pub on_enter: Option<ScreenActionFn>,
    pub on_exit: Option<ScreenActionFn>,
    pub on_input: ScreenInputFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The screen state machine.
pub struct ScreenMachine {
    table: [ScreenDescriptor; Screen::COUNT],
    current: usize,
    /// Accepted transitions since start.
    transitions: u32,
}

impl ScreenMachine {
    pub fn new(table: [ScreenDescriptor; Screen::COUNT], initial: Screen) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter`.  Call once before the first `dispatch()`.
    pub fn start(&mut self, ctx: &mut UiContext) {
        info!("FSM starting on screen: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Deliver one input to the current screen.
    ///
    /// Returns `(from, to)` when a transition was accepted.
    pub fn dispatch(&mut self, input: UiInput, ctx: &mut UiContext) -> Option<(Screen, Screen)> {
        let next = (self.table[self.current].on_input)(ctx, input)?;
        self.force_transition(next, ctx)
    }

    /// Transition unconditionally unless `next` is already current.
    pub fn force_transition(
        &mut self,
        next: Screen,
        ctx: &mut UiContext,
    ) -> Option<(Screen, Screen)> {
        if next as usize == self.current {
            return None;
        }
        let from = self.current_screen();
        self.transition(next, ctx);
        Some((from, next))
    }

    pub fn current_screen(&self) -> Screen {
        Screen::from_index(self.current)
    }

    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Screen, ctx: &mut UiContext) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions = self.transitions.wrapping_add(1);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
