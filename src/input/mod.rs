//! User input classifiers: the momentary button and the knob.
//!
//! Both consume already-sampled values (the hardware adapter owns the pins)
//! and record user activity on the shared [`ActivityClock`](crate::inactivity::ActivityClock).

pub mod button;
pub mod knob;

pub use button::{ButtonClassifier, PressEvent};
pub use knob::{KnobMovement, KnobTracker};
