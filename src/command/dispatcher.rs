// Dispatcher - slot bindings, undo stack and history log

use crate::command::commands::{CommandHandle, lock_command};
use crate::command::history::{Action, HistoryEntry, HistoryRecord, SlotId};
use crate::command::trait_def::{CommandError, UndoableCommand};
use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by dispatcher operations
///
/// None of these are fatal: a failed operation leaves the undo stack and the
/// history log exactly as they were.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("no commands bound to slot {0}")]
    SlotNotFound(SlotId),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error(transparent)]
    Command(#[from] CommandError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// The "on" and "off" commands bound to one slot
#[derive(Clone)]
pub struct SlotBinding {
    pub on: CommandHandle,
    pub off: CommandHandle,
}

impl SlotBinding {
    fn command(&self, action: Action) -> &CommandHandle {
        match action {
            Action::On => &self.on,
            Action::Off => &self.off,
        }
    }
}

/// Binds commands to slots, runs them, and keeps the undo stack and history
///
/// The undo stack is global: `press_undo` reverts the most recent press on
/// *any* slot. History is append-only; undoing does not remove or add entries.
///
/// All operations take `&mut self`, so presses and undos are serialized by
/// construction. To share a dispatcher across threads, wrap the whole value in
/// a single `Mutex`.
#[derive(Default)]
pub struct Dispatcher {
    slots: HashMap<SlotId, SlotBinding>,
    /// Most recent at the back
    undo_stack: Vec<CommandHandle>,
    history: Vec<HistoryEntry>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an on/off pair to a slot, replacing any previous binding
    ///
    /// Past history entries keep pointing at the commands that actually ran.
    pub fn bind(&mut self, slot: SlotId, on: CommandHandle, off: CommandHandle) {
        if self.slots.insert(slot, SlotBinding { on, off }).is_some() {
            tracing::debug!(slot, "slot rebound");
        }
    }

    /// Remove a slot's binding. Returns false if the slot was not bound.
    pub fn unbind(&mut self, slot: SlotId) -> bool {
        self.slots.remove(&slot).is_some()
    }

    pub fn is_bound(&self, slot: SlotId) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn binding(&self, slot: SlotId) -> Option<&SlotBinding> {
        self.slots.get(&slot)
    }

    /// Bound slot identifiers in ascending order
    pub fn bound_slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self.slots.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    /// Execute the "on" command bound to `slot`
    ///
    /// # Errors
    /// - `SlotNotFound` if the slot is unbound (nothing is recorded)
    /// - `Command` if the command fails (nothing is recorded)
    pub fn press_on(&mut self, slot: SlotId) -> DispatchResult<()> {
        self.press(slot, Action::On)
    }

    /// Execute the "off" command bound to `slot`
    pub fn press_off(&mut self, slot: SlotId) -> DispatchResult<()> {
        self.press(slot, Action::Off)
    }

    fn press(&mut self, slot: SlotId, action: Action) -> DispatchResult<()> {
        let binding = self
            .slots
            .get(&slot)
            .ok_or(DispatchError::SlotNotFound(slot))?;
        let handle = Arc::clone(binding.command(action));

        let (kind, description) = {
            let mut command = lock_command(&handle)?;
            command.execute()?;
            (command.kind(), command.description())
        };

        // Keep timestamps non-decreasing even if the wall clock steps back
        let now = Local::now();
        let timestamp = self
            .history
            .last()
            .map_or(now, |last| last.timestamp().max(now));

        tracing::debug!(slot, %action, command = %description, "button pressed");

        self.history.push(HistoryEntry::new(
            timestamp,
            action,
            slot,
            kind,
            description,
            Arc::clone(&handle),
        ));
        self.undo_stack.push(handle);

        Ok(())
    }

    /// Undo the most recently executed command, whichever slot it came from
    ///
    /// The undo itself is not recorded in history, and the command is not
    /// pushed anywhere: it can only be undone again after a fresh press.
    ///
    /// # Errors
    /// - `NothingToUndo` if the undo stack is empty
    /// - `Command` if the undo fails; the command stays on the stack
    pub fn press_undo(&mut self) -> DispatchResult<()> {
        let handle = self
            .undo_stack
            .pop()
            .ok_or(DispatchError::NothingToUndo)?;

        if let Err(err) = lock_command(&handle).and_then(|mut cmd| cmd.undo()) {
            self.undo_stack.push(handle);
            return Err(err.into());
        }

        tracing::debug!(remaining = self.undo_stack.len(), "last operation undone");
        Ok(())
    }

    /// Every executed press, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History formatted one line per entry, e.g. `12:30:01 - ON slot 0 (TurnOn)`
    pub fn history_report(&self) -> Vec<String> {
        self.history.iter().map(|entry| entry.to_string()).collect()
    }

    /// History as pretty-printed JSON records
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        let records: Vec<HistoryRecord> = self.history.iter().map(HistoryEntry::to_record).collect();
        serde_json::to_string_pretty(&records)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of commands on the undo stack
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Description of the command `press_undo` would revert
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack
            .last()
            .and_then(|handle| lock_command(handle).ok().map(|cmd| cmd.description()))
    }
}
