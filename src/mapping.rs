//! Raw knob counts to domain values.
//!
//! The knob potentiometer is wired so that turning clockwise lowers the ADC
//! reading; both maps are therefore inverted (higher raw, lower value).
//! Out-of-range samples are clamped, never rejected.

/// Lowest usable raw knob reading (the pot never quite reaches 0).
pub const KNOB_RAW_MIN: u16 = 10;
/// Highest raw knob reading (10-bit ADC full scale).
pub const KNOB_RAW_MAX: u16 = 1023;

/// Setpoint range in °F.
pub const TEMP_MIN_F: f32 = 35.0;
pub const TEMP_MAX_F: f32 = 90.0;

/// Range of the generic date component before per-field clamping.
pub const DATE_COMPONENT_MAX: u8 = 100;

/// Fraction of the knob travel, 0.0 at `KNOB_RAW_MAX` up to 1.0 at `KNOB_RAW_MIN`.
fn inverse_fraction(raw: u16) -> f32 {
    let raw = raw.clamp(KNOB_RAW_MIN, KNOB_RAW_MAX);
    f32::from(KNOB_RAW_MAX - raw) / f32::from(KNOB_RAW_MAX - KNOB_RAW_MIN)
}

/// Map a raw knob sample to a setpoint temperature in [35, 90] °F.
pub fn map_temperature(raw: u16) -> f32 {
    let t = TEMP_MIN_F + inverse_fraction(raw) * (TEMP_MAX_F - TEMP_MIN_F);
    t.clamp(TEMP_MIN_F, TEMP_MAX_F)
}

/// Map a raw knob sample to a generic date component in [0, 100].
///
/// The date editor clamps the result further to the bounds of the field
/// being edited.
pub fn map_date_component(raw: u16) -> u8 {
    let v = (inverse_fraction(raw) * f32::from(DATE_COMPONENT_MAX)).round();
    (v as u8).min(DATE_COMPONENT_MAX)
}
