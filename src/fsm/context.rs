//! Shared mutable context threaded through every screen handler.
//!
//! `UiContext` is the blackboard the screen handlers read from and write
//! to: the setpoint and date editor they edit, the latest readings and
//! wall-clock time (for display and as the editor's working copy), and the
//! output flags the service drains after dispatch.

use chrono::NaiveDateTime;

use crate::config::ControllerConfig;
use crate::control::setpoint::SetpointController;
use crate::editor::DateTimeEditor;

// ---------------------------------------------------------------------------
// Sensor snapshot (written by the service from the sensor port)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor the panel shows or regulates on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Ambient room temperature (°F).
    pub room_f: f32,
    /// Ambient relative humidity (%).
    pub humidity_pct: f32,
    /// Temperature reported by the remote heater relay (°F).
    pub relay_f: f32,
}

// ---------------------------------------------------------------------------
// UiContext
// ---------------------------------------------------------------------------

pub struct UiContext {
    // -- Edited state --
    pub setpoint: SetpointController,
    pub editor: DateTimeEditor,

    // -- Inputs refreshed before each dispatch --
    pub sensors: SensorSnapshot,
    /// Current wall-clock time.
    pub now: NaiveDateTime,

    // -- Outputs drained by the service --
    redraw: bool,
    time_commit: Option<NaiveDateTime>,
}

impl UiContext {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            setpoint: SetpointController::new(config),
            editor: DateTimeEditor::new(config),
            sensors: SensorSnapshot::default(),
            now: NaiveDateTime::default(),
            redraw: false,
            time_commit: None,
        }
    }

    /// Mark the display stale.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Return and clear the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// Queue a new wall-clock time for the service to commit.  The working
    /// copy is updated immediately so later edits in the same poll build on it.
    pub fn commit_time(&mut self, time: NaiveDateTime) {
        self.now = time;
        self.time_commit = Some(time);
    }

    pub fn take_time_commit(&mut self) -> Option<NaiveDateTime> {
        self.time_commit.take()
    }
}
