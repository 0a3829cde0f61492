// Reversible grid edits and the undo/redo history.
//
// Every user-visible mutation of a plan is an `EditCommand`:
//
// - `Place` installs an object. At execute time it records what the
//   placement displaced from the target slot, and the earlier copy of the
//   same id if the object was moved in from elsewhere. Undo removes the
//   object and puts both back, so it restores exactly what execute saw
//   rather than recomputing it afterwards.
// - `Remove` takes an object out by id and keeps it for undo.
// - `Composite` runs a list of commands in order and undoes them in
//   reverse, since later steps can depend on earlier ones' side effects.
//
// Commands borrow the `Grid` only for the duration of `execute`/`undo`;
// they never own it. The `Command` trait is what `CommandStack` is generic
// over, so callers can stack their own command types.
//
// `CommandStack` is a linear history with a cursor. `cursor` counts applied
// commands: entries `[0..cursor]` can be undone, `[cursor..]` redone.
// Executing truncates the redo tail; exceeding `max_history` drops the
// oldest entries.
//
// See also: `plan.rs` for the session that owns a stack, `grid.rs`.

use crate::grid::Grid;
use crate::object::GameObject;
use crate::types::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default history depth.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// A reversible operation on a grid.
pub trait Command {
    fn execute(&mut self, grid: &mut Grid);
    fn undo(&mut self, grid: &mut Grid);
    /// Human-readable label for history UI.
    fn description(&self) -> String;
}

// ---------------------------------------------------------------------------
// EditCommand
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditCommand {
    #[serde(rename_all = "camelCase")]
    Place {
        object: GameObject,
        #[serde(default)]
        displaced: Option<GameObject>,
        #[serde(default)]
        moved_from: Option<GameObject>,
    },
    Remove {
        id: ObjectId,
        #[serde(default)]
        removed: Option<GameObject>,
        #[serde(default)]
        description: Option<String>,
    },
    Composite {
        commands: Vec<EditCommand>,
        description: String,
    },
}

impl EditCommand {
    pub fn place(object: GameObject) -> Self {
        EditCommand::Place {
            object,
            displaced: None,
            moved_from: None,
        }
    }

    pub fn remove(id: ObjectId) -> Self {
        EditCommand::Remove {
            id,
            removed: None,
            description: None,
        }
    }

    pub fn remove_with_description(id: ObjectId, description: impl Into<String>) -> Self {
        EditCommand::Remove {
            id,
            removed: None,
            description: Some(description.into()),
        }
    }

    pub fn composite(commands: Vec<EditCommand>, description: impl Into<String>) -> Self {
        EditCommand::Composite {
            commands,
            description: description.into(),
        }
    }
}

impl Command for EditCommand {
    fn execute(&mut self, grid: &mut Grid) {
        match self {
            EditCommand::Place {
                object,
                displaced,
                moved_from,
            } => {
                *moved_from = grid
                    .get_object(object.id)
                    .filter(|o| o.position != object.position || o.slot != object.slot)
                    .cloned();
                *displaced = grid.place(object.clone());
            }
            EditCommand::Remove { id, removed, .. } => {
                *removed = grid.remove(*id);
            }
            EditCommand::Composite { commands, .. } => {
                for cmd in commands.iter_mut() {
                    cmd.execute(grid);
                }
            }
        }
    }

    fn undo(&mut self, grid: &mut Grid) {
        match self {
            EditCommand::Place {
                object,
                displaced,
                moved_from,
            } => {
                grid.remove(object.id);
                if let Some(d) = displaced {
                    grid.place(d.clone());
                }
                if let Some(m) = moved_from {
                    grid.place(m.clone());
                }
            }
            EditCommand::Remove { removed, .. } => {
                if let Some(obj) = removed {
                    grid.place(obj.clone());
                }
            }
            EditCommand::Composite { commands, .. } => {
                for cmd in commands.iter_mut().rev() {
                    cmd.undo(grid);
                }
            }
        }
    }

    fn description(&self) -> String {
        match self {
            EditCommand::Place { object, .. } => format!("Place {}", object.variant),
            EditCommand::Remove { description, .. } => {
                description.clone().unwrap_or_else(|| "Remove object".to_string())
            }
            EditCommand::Composite { description, .. } => description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandStack
// ---------------------------------------------------------------------------

/// Snapshot of history state for UI binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandStackState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_description: Option<String>,
    pub redo_description: Option<String>,
    pub history_len: usize,
    /// Index of the last applied entry; `None` before the first.
    pub current_index: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct CommandStack<C> {
    history: Vec<C>,
    cursor: usize,
    max_history: usize,
}

impl<C: Command> Default for CommandStack<C> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl<C: Command> CommandStack<C> {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: Vec::new(),
            cursor: 0,
            max_history,
        }
    }

    /// Run `cmd` against `grid` and record it.
    pub fn execute(&mut self, mut cmd: C, grid: &mut Grid) {
        cmd.execute(grid);
        self.history.truncate(self.cursor);
        self.history.push(cmd);
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
        self.cursor = self.history.len();
        debug!(len = self.history.len(), "command executed");
    }

    /// Reverse the last applied command. `false` if there is none.
    pub fn undo(&mut self, grid: &mut Grid) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let cmd = &mut self.history[self.cursor];
        cmd.undo(grid);
        debug!(description = %cmd.description(), cursor = self.cursor, "undo");
        true
    }

    /// Re-apply the next undone command. `false` if there is none.
    pub fn redo(&mut self, grid: &mut Grid) -> bool {
        if self.cursor >= self.history.len() {
            return false;
        }
        let cmd = &mut self.history[self.cursor];
        cmd.execute(grid);
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.history.get(i))
            .map(Command::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.history.get(self.cursor).map(Command::description)
    }

    pub fn state(&self) -> CommandStackState {
        CommandStackState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_description: self.undo_description(),
            redo_description: self.redo_description(),
            history_len: self.history.len(),
            current_index: self.cursor.checked_sub(1),
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}
