// History log entries recorded by the dispatcher

use crate::command::commands::CommandHandle;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot identifier on the remote
pub type SlotId = u32;

/// Which button of a slot was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    On,
    Off,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::On => write!(f, "ON"),
            Action::Off => write!(f, "OFF"),
        }
    }
}

/// One executed button press
///
/// Entries are immutable once appended. The command handle points at the
/// same instance that was pushed onto the undo stack.
#[derive(Clone)]
pub struct HistoryEntry {
    timestamp: DateTime<Local>,
    action: Action,
    slot: SlotId,
    kind: &'static str,
    description: String,
    command: CommandHandle,
}

impl HistoryEntry {
    pub(crate) fn new(
        timestamp: DateTime<Local>,
        action: Action,
        slot: SlotId,
        kind: &'static str,
        description: String,
        command: CommandHandle,
    ) -> Self {
        Self {
            timestamp,
            action,
            slot,
            kind,
            description,
            command,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Command variant name at the time of the press
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Command description at the time of the press
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn command(&self) -> &CommandHandle {
        &self.command
    }

    /// Detached, serializable copy of this entry
    pub fn to_record(&self) -> HistoryRecord {
        HistoryRecord {
            timestamp: self.timestamp,
            action: self.action,
            slot: self.slot,
            kind: self.kind.to_owned(),
            description: self.description.clone(),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} slot {} ({})",
            self.timestamp.format("%H:%M:%S"),
            self.action,
            self.slot,
            self.kind
        )
    }
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("timestamp", &self.timestamp)
            .field("action", &self.action)
            .field("slot", &self.slot)
            .field("description", &self.description)
            .finish()
    }
}

/// Serializable snapshot of a history entry, used for export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Local>,
    pub action: Action,
    pub slot: SlotId,
    pub kind: String,
    pub description: String,
}
