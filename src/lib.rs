// Smart Remote - reversible commands for home devices

pub mod command;
pub mod config;
pub mod device;

// Re-export commonly used types for convenience
pub use command::{
    Action, Command, CommandError, CommandHandle, DispatchError, Dispatcher, HistoryEntry,
    MacroCommand, SlotId, UndoableCommand,
};
pub use config::{ConfigError, Home, HomeConfig};
pub use device::{Controllable, DeviceError, Light, SharedTarget, Thermostat, shared};
