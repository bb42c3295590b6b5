//! Thermopanel Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed-cadence poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PanelHardware       SensorHub    SystemClock   LcdDisplay     │
//! │  (Input+Panel)       (Sensor)     (Clock)       (Display)      │
//! │  LogRadio            LogEventSink                              │
//! │  (CommandSink)       (EventSink)                               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControllerService (pure logic)              │    │
//! │  │  Button · Knob · Screen FSM · Inactivity · Heater      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::{ADC1, attenuation};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{ADCPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use thermopanel::adapters::display::{LcdDisplay, LogLineWriter};
use thermopanel::adapters::hardware::{AnalogSource, PanelHardware};
use thermopanel::adapters::log_sink::LogEventSink;
use thermopanel::adapters::radio::LogRadio;
use thermopanel::adapters::sensors::SensorHub;
use thermopanel::adapters::time::SystemClock;
use thermopanel::app::service::ControllerService;
use thermopanel::config::ControllerConfig;
use thermopanel::error::{Error, HardwareError};
use thermopanel::pins;

// ── ADC adapter ───────────────────────────────────────────────

/// One-shot ADC1 channel, right-shifted to the scale the caller expects.
struct EspAnalog<'a, P: ADCPin<Adc = ADC1>> {
    channel: AdcChannelDriver<'a, P, &'a AdcDriver<'a, ADC1>>,
    shift: u32,
}

impl<P: ADCPin<Adc = ADC1>> AnalogSource for EspAnalog<'_, P> {
    fn read_raw(&mut self) -> Result<u16, HardwareError> {
        self.channel
            .read()
            .map(|raw| raw >> self.shift)
            .map_err(|_| HardwareError::AdcReadFailed)
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thermopanel v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config = ControllerConfig::default();
    config.validate()?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals =
        Peripherals::take().map_err(|_| Error::Init("peripherals already taken"))?;
    info!(
        "Pins: button={} knob={} thermistor={} backlight={} buzzer={}",
        pins::BUTTON_GPIO,
        pins::KNOB_ADC_GPIO,
        pins::TEMP_ADC_GPIO,
        pins::BACKLIGHT_GPIO,
        pins::BUZZER_GPIO,
    );

    let mut button = PinDriver::input(peripherals.pins.gpio16)?;
    button.set_pull(Pull::Up)?;
    let backlight = PinDriver::output(peripherals.pins.gpio11.downgrade_output())?;
    let buzzer = PinDriver::output(peripherals.pins.gpio12.downgrade_output())?;

    let adc = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: attenuation::DB_11,
        ..Default::default()
    };
    let knob = EspAnalog {
        channel: AdcChannelDriver::new(&adc, peripherals.pins.gpio4, &adc_config)?,
        shift: pins::KNOB_ADC_SHIFT,
    };
    let thermistor = EspAnalog {
        channel: AdcChannelDriver::new(&adc, peripherals.pins.gpio9, &adc_config)?,
        shift: 0,
    };

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = PanelHardware::new(
        button,
        backlight,
        buzzer,
        FreeRtos,
        knob,
        SensorHub::new(thermistor),
        LcdDisplay::new(LogLineWriter),
        SystemClock::new(),
    );
    let mut radio = LogRadio::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Control core ───────────────────────────────────────
    let mut service = ControllerService::new(&config);
    service.start(&mut hw, &mut log_sink);

    info!("System ready. Entering poll loop ({} ms).", config.poll_interval_ms);

    // ── 6. Poll loop ──────────────────────────────────────────
    loop {
        service.poll(&mut hw, &mut radio, &mut log_sink);
        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
