// Thermostat with a numeric setpoint

use crate::device::{Controllable, DeviceError, DeviceResult};

/// Setpoint a freshly installed thermostat reports, in °C
pub const DEFAULT_TEMPERATURE: f64 = 22.0;

#[derive(Debug, Clone)]
pub struct Thermostat {
    location: String,
    temperature: f64,
    online: bool,
}

impl Thermostat {
    pub fn new(location: impl Into<String>) -> Self {
        Self::with_temperature(location, DEFAULT_TEMPERATURE)
    }

    pub fn with_temperature(location: impl Into<String>, temperature: f64) -> Self {
        Self {
            location: location.into(),
            temperature,
            online: true,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }
}

impl Controllable for Thermostat {
    type Value = f64;

    fn location(&self) -> &str {
        &self.location
    }

    fn state(&self) -> DeviceResult<f64> {
        if !self.online {
            return Err(DeviceError::Offline(self.location.clone()));
        }
        Ok(self.temperature)
    }

    fn set_state(&mut self, value: f64) -> DeviceResult<()> {
        if !self.online {
            return Err(DeviceError::Offline(self.location.clone()));
        }
        self.temperature = value;
        tracing::info!(location = %self.location, temperature = value, "thermostat set");
        Ok(())
    }
}
