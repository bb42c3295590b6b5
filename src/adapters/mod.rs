//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to                  |
//! |------------|-----------------------------|------------------------------|
//! | `hardware` | InputPort, PanelPort        | button, backlight, buzzer, knob ADC |
//! |            | SensorPort, ClockPort       | (delegates to the two below) |
//! | `sensors`  | SensorPort                  | thermistor ADC, cached humidity/relay |
//! | `time`     | ClockPort                   | ESP32 system timer           |
//! | `display`  | DisplayDriver               | 16x2 LCD line writer         |
//! | `radio`    | CommandSink                 | heater relay radio link      |
//! | `log_sink` | EventSink                   | Serial log output            |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod radio;
pub mod sensors;
pub mod time;
