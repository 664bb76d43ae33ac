// Binary on/off light

use crate::device::{Controllable, DeviceError, DeviceResult};

/// A light that is either on or off. Lights start switched off.
#[derive(Debug, Clone)]
pub struct Light {
    location: String,
    is_on: bool,
    online: bool,
}

impl Light {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            is_on: false,
            online: true,
        }
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn turn_on(&mut self) -> DeviceResult<()> {
        self.set_state(true)
    }

    pub fn turn_off(&mut self) -> DeviceResult<()> {
        self.set_state(false)
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Take the light offline (or back online). Offline lights reject reads and writes.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    fn ensure_online(&self) -> DeviceResult<()> {
        if self.online {
            Ok(())
        } else {
            Err(DeviceError::Offline(self.location.clone()))
        }
    }
}

impl Controllable for Light {
    type Value = bool;

    fn location(&self) -> &str {
        &self.location
    }

    fn state(&self) -> DeviceResult<bool> {
        self.ensure_online()?;
        Ok(self.is_on)
    }

    fn set_state(&mut self, value: bool) -> DeviceResult<()> {
        self.ensure_online()?;
        self.is_on = value;
        let state = if value { "on" } else { "off" };
        tracing::info!(location = %self.location, state, "light switched");
        Ok(())
    }
}
