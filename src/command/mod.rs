// Command Pattern for reversible remote-control actions
//
// Architecture:
// - UndoableCommand trait: execute(), undo(), description()
// - Command: closed set of concrete commands (switch, setpoint, macro)
// - MacroCommand: ordered members, reverted in reverse execution order
// - Dispatcher: slot bindings, global undo stack, append-only history
//
// Commands hold their target devices directly and capture the device's
// previous state on every execute.

pub mod commands;
pub mod dispatcher;
pub mod history;
pub mod macro_command;
pub mod trait_def;

pub use commands::{Command, CommandHandle, SetStateCommand};
pub use dispatcher::{DispatchError, DispatchResult, Dispatcher, SlotBinding};
pub use history::{Action, HistoryEntry, HistoryRecord, SlotId};
pub use macro_command::MacroCommand;
pub use trait_def::{CommandError, CommandResult, UndoableCommand};
