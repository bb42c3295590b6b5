//! GPIO / peripheral pin assignments for the thermopanel board.
//!
//! Single source of truth — the firmware entry point references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Momentary push-button (active-low with external pull-up).
pub const BUTTON_GPIO: i32 = 16;

/// Knob potentiometer wiper, ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const KNOB_ADC_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;

/// The knob ADC is 12-bit; the UI works on a 10-bit scale.
pub const KNOB_ADC_SHIFT: u32 = 2;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// LCD backlight enable (active HIGH).
pub const BACKLIGHT_GPIO: i32 = 11;

/// Piezo buzzer for the relay over-temperature alarm (active HIGH).
pub const BUZZER_GPIO: i32 = 12;

