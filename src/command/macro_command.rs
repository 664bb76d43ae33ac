// MacroCommand - several commands executed and undone as one unit

use crate::command::commands::{CommandHandle, lock_command};
use crate::command::trait_def::{CommandResult, UndoableCommand};
use std::sync::Arc;

/// Command composed of an ordered list of member commands
///
/// `execute` runs the members in order and records each one as it completes.
/// `undo` walks that record backwards, so only members that actually ran are
/// reverted. If a member fails during `execute`, the members that already ran
/// are rolled back before the error is returned.
///
/// Members are shared handles: the same command may be bound to a slot and
/// be part of a macro at the same time. Macros may contain macros.
pub struct MacroCommand {
    members: Vec<CommandHandle>,
    /// Members completed by the most recent `execute`, in execution order
    executed: Vec<CommandHandle>,
}

impl MacroCommand {
    pub fn new(members: Vec<CommandHandle>) -> Self {
        Self {
            members,
            executed: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members that would be reverted by `undo`
    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }
}

/// Undo every recorded member in reverse order, leaving the record empty.
/// Failures are logged and skipped so the remaining members still get reverted.
fn rollback(executed: &mut Vec<CommandHandle>) {
    while let Some(member) = executed.pop() {
        if let Err(err) = lock_command(&member).and_then(|mut cmd| cmd.undo()) {
            tracing::error!(error = %err, "macro rollback failed for member");
        }
    }
}

impl UndoableCommand for MacroCommand {
    fn execute(&mut self) -> CommandResult<()> {
        self.executed.clear();

        for member in &self.members {
            if let Err(err) = lock_command(member).and_then(|mut cmd| cmd.execute()) {
                tracing::warn!(
                    error = %err,
                    completed = self.executed.len(),
                    "macro member failed, rolling back"
                );
                rollback(&mut self.executed);
                return Err(err);
            }
            self.executed.push(Arc::clone(member));
        }

        Ok(())
    }

    fn undo(&mut self) -> CommandResult<()> {
        while let Some(member) = self.executed.pop() {
            if let Err(err) = lock_command(&member).and_then(|mut cmd| cmd.undo()) {
                // Keep it recorded so a retry resumes from here
                self.executed.push(member);
                return Err(err);
            }
        }

        Ok(())
    }

    fn description(&self) -> String {
        let names: Vec<String> = self
            .members
            .iter()
            .map(|member| {
                lock_command(member)
                    .map(|cmd| cmd.description())
                    .unwrap_or_else(|_| "<busy>".to_owned())
            })
            .collect();

        format!("Macro [{}]", names.join(", "))
    }
}
