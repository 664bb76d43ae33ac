// Concrete command implementations

use crate::command::macro_command::MacroCommand;
use crate::command::trait_def::{CommandError, CommandResult, UndoableCommand};
use crate::device::{SharedTarget, StateValue, lock_target};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// Shared handle to a command
///
/// Slot bindings, macros, the history log and the undo stack all hold the
/// same instance through this handle.
pub type CommandHandle = Arc<Mutex<Command>>;

/// Lock a command handle without blocking
///
/// A handle that is already locked can only mean the command is running
/// further up the current call chain, so it is reported as `Busy` instead of
/// deadlocking.
pub fn lock_command(handle: &CommandHandle) -> CommandResult<MutexGuard<'_, Command>> {
    handle.try_lock().map_err(|e| match e {
        TryLockError::WouldBlock => CommandError::Busy("command is already running".into()),
        TryLockError::Poisoned(p) => CommandError::Poisoned(p.to_string()),
    })
}

/// Command that writes a fixed value to a single device
///
/// The device's previous value is captured on every `execute`, so two
/// executions followed by one undo restore the value seen by the second one.
pub struct SetStateCommand<V: StateValue> {
    target: SharedTarget<V>,
    location: String,
    value: V,
    previous: Option<V>,
}

impl<V: StateValue> SetStateCommand<V> {
    /// Create a new SetStateCommand
    ///
    /// # Arguments
    /// * `target` - The device to control
    /// * `value` - The value written on `execute`
    pub fn new(target: SharedTarget<V>, value: V) -> Self {
        let location = match target.lock() {
            Ok(device) => device.location().to_owned(),
            Err(poisoned) => poisoned.into_inner().location().to_owned(),
        };

        Self {
            target,
            location,
            value,
            previous: None,
        }
    }

    pub fn value(&self) -> V {
        self.value
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// State captured by the most recent successful `execute`
    pub fn previous(&self) -> Option<V> {
        self.previous
    }
}

impl<V: StateValue> UndoableCommand for SetStateCommand<V> {
    fn execute(&mut self) -> CommandResult<()> {
        let mut target = lock_target(&self.target)?;
        let previous = target.state()?;
        target.set_state(self.value)?;

        // Only commit the capture once the write went through
        self.previous = Some(previous);
        Ok(())
    }

    fn undo(&mut self) -> CommandResult<()> {
        let Some(previous) = self.previous else {
            tracing::debug!(location = %self.location, "undo before execute ignored");
            return Ok(());
        };

        lock_target(&self.target)?.set_state(previous)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Set {} to {:?}", self.location, self.value)
    }
}

/// The closed set of commands a remote can bind
pub enum Command {
    /// Switch a binary device on or off
    Switch(SetStateCommand<bool>),
    /// Move a numeric setpoint
    Setpoint(SetStateCommand<f64>),
    /// Run several commands as one unit
    Macro(MacroCommand),
}

impl Command {
    pub fn turn_on(target: SharedTarget<bool>) -> Self {
        Command::Switch(SetStateCommand::new(target, true))
    }

    pub fn turn_off(target: SharedTarget<bool>) -> Self {
        Command::Switch(SetStateCommand::new(target, false))
    }

    pub fn set_temperature(target: SharedTarget<f64>, temperature: f64) -> Self {
        Command::Setpoint(SetStateCommand::new(target, temperature))
    }

    pub fn macro_of(members: Vec<CommandHandle>) -> Self {
        Command::Macro(MacroCommand::new(members))
    }

    /// Short name of the command variant, as shown in history reports
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Switch(cmd) if cmd.value() => "TurnOn",
            Command::Switch(_) => "TurnOff",
            Command::Setpoint(_) => "SetTemperature",
            Command::Macro(_) => "Macro",
        }
    }

    /// Wrap the command in a shareable handle
    pub fn into_handle(self) -> CommandHandle {
        Arc::new(Mutex::new(self))
    }
}

impl UndoableCommand for Command {
    fn execute(&mut self) -> CommandResult<()> {
        match self {
            Command::Switch(cmd) => cmd.execute(),
            Command::Setpoint(cmd) => cmd.execute(),
            Command::Macro(cmd) => cmd.execute(),
        }
    }

    fn undo(&mut self) -> CommandResult<()> {
        match self {
            Command::Switch(cmd) => cmd.undo(),
            Command::Setpoint(cmd) => cmd.undo(),
            Command::Macro(cmd) => cmd.undo(),
        }
    }

    fn description(&self) -> String {
        match self {
            Command::Switch(cmd) if cmd.value() => format!("Turn on {}", cmd.location()),
            Command::Switch(cmd) => format!("Turn off {}", cmd.location()),
            Command::Setpoint(cmd) => format!("Set {} to {:.1}", cmd.location(), cmd.value()),
            Command::Macro(cmd) => cmd.description(),
        }
    }
}
