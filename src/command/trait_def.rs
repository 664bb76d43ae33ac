// UndoableCommand trait definition

use crate::device::DeviceError;
use thiserror::Error;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while executing or undoing a command
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    /// The target device rejected a read or write
    #[error("target unavailable: {0}")]
    TargetUnavailable(#[from] DeviceError),

    /// The command is already running further up the call chain
    /// (e.g. a macro that contains itself)
    #[error("command busy: {0}")]
    Busy(String),

    /// A previous holder of the command panicked while it was running
    #[error("command lock poisoned: {0}")]
    Poisoned(String),
}

/// Trait for reversible commands
///
/// A command is bound to its target(s) when it is created. `execute` captures
/// whatever it needs to reverse itself before mutating anything, and `undo`
/// restores that captured state.
///
/// # Example
/// ```
/// use smart_remote::command::trait_def::{CommandResult, UndoableCommand};
///
/// struct Counter {
///     value: i32,
///     old_value: Option<i32>,
/// }
///
/// impl UndoableCommand for Counter {
///     fn execute(&mut self) -> CommandResult<()> {
///         self.old_value = Some(self.value);
///         self.value += 1;
///         Ok(())
///     }
///
///     fn undo(&mut self) -> CommandResult<()> {
///         if let Some(old) = self.old_value {
///             self.value = old;
///         }
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Increment to {}", self.value + 1)
///     }
/// }
/// ```
pub trait UndoableCommand: Send {
    /// Execute the command
    ///
    /// Must store the target's previous state for `undo`. On failure the
    /// previously captured state is left untouched.
    fn execute(&mut self) -> CommandResult<()>;

    /// Undo the command
    ///
    /// Restores the state captured by the most recent `execute`. Undoing a
    /// command that was never executed is a no-op.
    fn undo(&mut self) -> CommandResult<()>;

    /// Get a human-readable description of the command
    fn description(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_error_converts_to_target_unavailable() {
        let err: CommandError = DeviceError::Offline("hall".into()).into();
        assert_eq!(
            err,
            CommandError::TargetUnavailable(DeviceError::Offline("hall".into()))
        );
        assert_eq!(
            err.to_string(),
            "target unavailable: device in hall is offline"
        );
    }
}
