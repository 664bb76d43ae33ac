// Controllable devices - the targets that commands read and mutate
//
// Devices are owned outside of the command layer and shared with commands
// through `SharedTarget` handles. A command only ever touches a device
// through the `Controllable` trait.

pub mod light;
pub mod thermostat;

pub use light::Light;
pub use thermostat::Thermostat;

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors reported by a device when it rejects a read or a write
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("device in {0} is offline")]
    Offline(String),

    #[error("device lock poisoned: {0}")]
    Poisoned(String),
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Bounds shared by every device state value
pub trait StateValue: Copy + Debug + PartialEq + Send + 'static {}

impl<T: Copy + Debug + PartialEq + Send + 'static> StateValue for T {}

/// A device with a single observable state value
///
/// `Value` is `bool` for on/off devices and `f64` for setpoint devices.
pub trait Controllable: Send {
    type Value: StateValue;

    /// Human-readable location, used in descriptions and logs
    fn location(&self) -> &str;

    /// Read the current state
    fn state(&self) -> DeviceResult<Self::Value>;

    /// Write a new state
    fn set_state(&mut self, value: Self::Value) -> DeviceResult<()>;
}

/// Shared handle to a device, as held by commands
pub type SharedTarget<V> = Arc<Mutex<dyn Controllable<Value = V>>>;

/// Wrap a device so it can be shared between the owner and its commands
pub fn shared<T: Controllable>(device: T) -> Arc<Mutex<T>> {
    Arc::new(Mutex::new(device))
}

/// Lock a shared device, mapping a poisoned lock to `DeviceError::Poisoned`
pub fn lock_target<V: StateValue>(
    target: &SharedTarget<V>,
) -> DeviceResult<MutexGuard<'_, dyn Controllable<Value = V> + 'static>> {
    target
        .lock()
        .map_err(|e| DeviceError::Poisoned(e.to_string()))
}
