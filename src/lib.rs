//! Thermopanel firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod editor;
pub mod error;
pub mod fsm;
pub mod inactivity;
pub mod input;
pub mod mapping;
pub mod pins;

pub mod adapters;
