//! Date/time field editor.
//!
//! While the `EditDateTime` screen is active the button cycles through the
//! fields and the knob sets the selected one:
//!
//! ```text
//!  Month ─▶ Day ─▶ Year ─▶ Hour ─▶ Minute ─┐
//!    ▲                                     │
//!    └─────────────────────────────────────┘
//! ```
//!
//! The knob delivers a generic 0–100 component which is clamped to the
//! field's range (`Year` is an offset from `year_base`).  The edit is
//! applied to a working copy of the current wall-clock time and handed back
//! for the service to commit to the system clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, info};

use crate::config::ControllerConfig;

/// Field currently selected for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeField {
    Month,
    Day,
    Year,
    Hour,
    Minute,
}

impl DateTimeField {
    pub const COUNT: usize = 5;

    /// Next field in the editing cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::Month => Self::Day,
            Self::Day => Self::Year,
            Self::Year => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::Month,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Day => "Day",
            Self::Year => "Year",
            Self::Hour => "Hour",
            Self::Minute => "Minute",
        }
    }
}

pub struct DateTimeEditor {
    field: DateTimeField,
    year_base: i32,
    /// Last committed clamped value for the current field.
    last_applied: Option<i32>,
}

impl DateTimeEditor {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            field: DateTimeField::Month,
            year_base: config.year_base,
            last_applied: None,
        }
    }

    /// Start an editing session.  The selected field is kept.
    pub fn begin(&mut self) {
        self.last_applied = None;
    }

    /// Advance to the next field.
    pub fn cycle_field(&mut self) -> DateTimeField {
        self.field = self.field.next();
        self.last_applied = None;
        debug!("editor: field -> {}", self.field.label());
        self.field
    }

    pub fn field(&self) -> DateTimeField {
        self.field
    }

    /// Clamp a knob component to the selected field's range.
    pub fn clamp_for_field(&self, value: u8) -> i32 {
        let v = i32::from(value);
        match self.field {
            DateTimeField::Month => v.clamp(1, 12),
            DateTimeField::Day => v.clamp(1, 31),
            DateTimeField::Year => self.year_base + v,
            DateTimeField::Hour => v.clamp(0, 23),
            DateTimeField::Minute => v.clamp(0, 59),
        }
    }

    /// Apply a knob component to `now`.  Returns the new wall-clock time to
    /// commit, or `None` when the clamped value has not changed.
    pub fn apply_knob(&mut self, value: u8, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let clamped = self.clamp_for_field(value);
        if self.last_applied == Some(clamped) {
            return None;
        }
        self.last_applied = Some(clamped);

        let edited = self.with_field(now, clamped)?;
        info!("CLOCK: {} set to {clamped} -> {edited}", self.field.label());
        Some(edited)
    }

    /// Rebuild `now` with the selected field replaced.  Day is pulled in to
    /// the last day of the month so the result is always a real date.
    fn with_field(&self, now: NaiveDateTime, value: i32) -> Option<NaiveDateTime> {
        let (mut year, mut month, mut day) = (now.year(), now.month(), now.day());
        let (mut hour, mut minute) = (now.hour(), now.minute());
        match self.field {
            DateTimeField::Month => month = value as u32,
            DateTimeField::Day => day = value as u32,
            DateTimeField::Year => year = value,
            DateTimeField::Hour => hour = value as u32,
            DateTimeField::Minute => minute = value as u32,
        }
        let day = day.min(days_in_month(year, month));
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(date.and_time(time))
    }
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}
