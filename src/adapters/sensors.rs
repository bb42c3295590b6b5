//! Sensor hub — room thermistor plus values relayed by other collaborators.
//!
//! The room NTC thermistor (10 kOhm @ 25 C, B = 3950) sits in a voltage
//! divider with a fixed 10 kOhm resistor and is read through an
//! [`AnalogSource`].  The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature.
//!
//! Humidity and the heater relay's own temperature arrive from outside
//! (humidity sensor task, radio link) and are cached here until the next
//! update.  A failed thermistor read keeps the previous room temperature.

use log::warn;

use super::hardware::AnalogSource;
use crate::app::ports::SensorPort;
use crate::fsm::context::SensorSnapshot;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

/// Reported when the divider reads open or shorted.
const FAULT_F: f32 = -40.0;

/// Convert a 12-bit divider reading to degrees Fahrenheit.
pub fn adc_to_fahrenheit(raw: u16) -> f32 {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
        return FAULT_F;
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return FAULT_F;
    }
    let celsius = (1.0 / inv_t) - 273.15;
    celsius * 9.0 / 5.0 + 32.0
}

pub struct SensorHub<T> {
    thermistor: T,
    snapshot: SensorSnapshot,
}

impl<T: AnalogSource> SensorHub<T> {
    pub fn new(thermistor: T) -> Self {
        Self {
            thermistor,
            snapshot: SensorSnapshot::default(),
        }
    }

    /// Latest relative humidity from the humidity sensor.
    pub fn set_humidity(&mut self, pct: f32) {
        self.snapshot.humidity_pct = pct;
    }

    /// Latest temperature reported by the heater relay.
    pub fn set_relay_temperature(&mut self, fahrenheit: f32) {
        self.snapshot.relay_f = fahrenheit;
    }
}

impl<T: AnalogSource> SensorPort for SensorHub<T> {
    fn read_all(&mut self) -> SensorSnapshot {
        match self.thermistor.read_raw() {
            Ok(raw) => self.snapshot.room_f = adc_to_fahrenheit(raw),
            Err(e) => {
                warn!(
                    "sensors: thermistor read failed ({e}), keeping {:.1}F",
                    self.snapshot.room_f
                );
            }
        }
        self.snapshot
    }
}
