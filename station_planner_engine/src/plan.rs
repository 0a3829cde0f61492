// A planning session: one grid, its edit history, and an id source.
//
// `BuildPlan` is the owner that the engine's single-writer model assumes.
// All edits go through it so they land in the undo history:
//
// - `place(obj)` runs the placement check, resolves it (as-is, or the
//   existing occupant reshaped by an auto-junction), and executes a
//   `Place` command. A blocked check mutates nothing and is returned to
//   the caller unchanged. Re-placing an object that is already in the grid
//   moves it; if the move merges it into another piece, its old copy is
//   removed in the same undo step.
// - `remove` / `remove_many` execute `Remove` commands; several ids become
//   one composite entry, so one undo restores them all.
// - `undo` / `redo` step the history; `history()` is the UI snapshot.
//
// Any executed, undone or redone command marks the plan dirty until
// `mark_saved()`.
//
// ## Serialization
//
// The saved form is the plain record list, `{"objects": [...]}`, in grid
// order. History and the id generator are session state and are not saved.
// `from_json` rejects a record list that a grid cannot represent (duplicate
// ids, two records in one slot, records whose classification disagrees
// with their variant) instead of silently dropping records.
//
// See also: `placement.rs`, `command.rs`, `validation.rs`, `config.rs`.

use crate::command::{CommandStack, CommandStackState, EditCommand};
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::grid::Grid;
use crate::object::GameObject;
use crate::placement::{self, PlacementCheck};
use crate::prng::IdRng;
use crate::types::ObjectId;
use crate::validation::{self, RecordClash, Severity, ValidationResult};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The saved form of a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecords {
    pub objects: Vec<GameObject>,
}

#[derive(Clone, Debug)]
pub struct BuildPlan {
    grid: Grid,
    history: CommandStack<EditCommand>,
    rng: IdRng,
    config: PlannerConfig,
    dirty: bool,
}

impl BuildPlan {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, PlannerConfig::default())
    }

    pub fn with_config(seed: u64, config: PlannerConfig) -> Self {
        Self {
            grid: Grid::new(),
            history: CommandStack::new(config.max_history),
            rng: IdRng::new(seed),
            config,
            dirty: false,
        }
    }

    /// A fresh id not used by any object in the plan.
    pub fn next_id(&mut self) -> ObjectId {
        loop {
            let id = ObjectId::new(&mut self.rng);
            if !self.grid.contains(id) {
                return id;
            }
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn prepare(&self, mut obj: GameObject) -> GameObject {
        if self.config.snap_on_place {
            obj.position = obj.position.snap(obj.grid_type());
        }
        obj
    }

    /// Placement check without placing. Applies the same snapping `place`
    /// would.
    pub fn check(&self, obj: &GameObject) -> PlacementCheck {
        let obj = self.prepare(obj.clone());
        placement::can_place(&self.grid, &obj)
    }

    /// Place `obj` if the check allows it. Returns the check either way.
    pub fn place(&mut self, obj: GameObject) -> PlacementCheck {
        let obj = self.prepare(obj);
        let check = placement::can_place(&self.grid, &obj);
        match check.resolve(&obj) {
            Some(resolved) => {
                let moving = resolved.id != obj.id && self.grid.contains(obj.id);
                let cmd = if moving {
                    // A placed object merging into another piece: take it
                    // out of its old position in the same undo step.
                    let description = format!("Move {}", obj.variant);
                    EditCommand::composite(
                        vec![EditCommand::remove(obj.id), EditCommand::place(resolved)],
                        description,
                    )
                } else {
                    EditCommand::place(resolved)
                };
                self.history.execute(cmd, &mut self.grid);
                self.dirty = true;
            }
            None => {
                debug!(id = %obj.id, position = %obj.position, "placement refused");
            }
        }
        check
    }

    /// Remove one object. `false` if the id is not in the plan.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        if !self.grid.contains(id) {
            return false;
        }
        self.history.execute(EditCommand::remove(id), &mut self.grid);
        self.dirty = true;
        true
    }

    /// Remove several objects as one undoable step. Ids not in the plan are
    /// skipped; returns how many were removed.
    pub fn remove_many(&mut self, ids: &[ObjectId], description: &str) -> usize {
        let mut seen = FxHashSet::default();
        let commands: Vec<EditCommand> = ids
            .iter()
            .copied()
            .filter(|id| self.grid.contains(*id) && seen.insert(*id))
            .map(EditCommand::remove)
            .collect();
        let count = commands.len();
        if count > 0 {
            self.history
                .execute(EditCommand::composite(commands, description), &mut self.grid);
            self.dirty = true;
        }
        count
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.grid);
        self.dirty |= undone;
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.grid);
        self.dirty |= redone;
        redone
    }

    pub fn history(&self) -> CommandStackState {
        self.history.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Empty the plan and its history.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.history.clear();
        self.dirty = true;
    }

    /// All objects as plain records, in grid order.
    pub fn objects(&self) -> Vec<GameObject> {
        self.grid.all_objects().cloned().collect()
    }

    pub fn to_json(&self) -> Result<String, PlanError> {
        let records = PlanRecords {
            objects: self.objects(),
        };
        Ok(serde_json::to_string(&records)?)
    }

    /// Load a saved plan. History starts empty and the plan starts clean.
    pub fn from_json(seed: u64, json: &str) -> Result<Self, PlanError> {
        Self::from_json_with_config(seed, json, PlannerConfig::default())
    }

    pub fn from_json_with_config(seed: u64, json: &str, config: PlannerConfig) -> Result<Self, PlanError> {
        let records: PlanRecords = serde_json::from_str(json)?;
        let mut plan = Self::with_config(seed, config);
        plan.load_records(records.objects)?;
        Ok(plan)
    }

    /// Replace the plan's contents with `records`. On error the plan is left
    /// untouched.
    pub fn load_records(&mut self, records: Vec<GameObject>) -> Result<(), PlanError> {
        check_records(&records).inspect_err(|e| warn!(error = %e, "rejected plan records"))?;
        self.grid.clear();
        self.history.clear();
        for obj in records {
            self.grid.place(obj);
        }
        self.dirty = false;
        debug!(objects = self.grid.object_count(), "plan loaded");
        Ok(())
    }

    /// Grid consistency findings, plus structural support warnings when
    /// enabled in the config.
    pub fn validate(&self) -> Vec<ValidationResult> {
        let mut findings = validation::validate_grid(&self.grid);
        if self.config.structural_support_warnings {
            findings.extend(
                self.grid
                    .all_objects()
                    .map(|obj| validation::check_structural_support(&self.grid, obj))
                    .filter(|r| r.severity == Severity::Warning),
            );
        }
        findings
    }
}

fn check_records(records: &[GameObject]) -> Result<(), PlanError> {
    if let Some(bad) = records.iter().find(|obj| !obj.is_consistent()) {
        return Err(PlanError::InconsistentRecord(bad.id));
    }
    match validation::record_clashes(records).first() {
        None => Ok(()),
        Some(RecordClash::DuplicateId(id)) => Err(PlanError::DuplicateId(*id)),
        Some(&RecordClash::SlotCollision { position, slot, .. }) => {
            Err(PlanError::SlotCollision { position, slot })
        }
    }
}
