pub mod heater;
pub mod setpoint;
