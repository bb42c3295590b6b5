//! Application core — pure control logic, zero I/O.
//!
//! The [`service`] wires the input classifiers, screen FSM, inactivity
//! monitor and heater controller into one poll cycle.  All interaction with
//! hardware happens through the **port traits** in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
