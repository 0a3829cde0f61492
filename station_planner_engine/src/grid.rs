// Sparse spatial index of every placed object.
//
// `Grid` owns a `BTreeMap<Grid3, Cell>` (only occupied positions have a
// cell) and a reverse index `ObjectId -> Grid3` so an object can be found by
// id without scanning. It is the only thing that creates or destroys cells:
// `place` creates a cell lazily, `remove` drops a cell once it is empty.
//
// The reverse index is kept in lock step with the cells:
//
// - `place` drops the index entry of whatever it displaced *before* writing
//   the new object's entry. A transform re-places an object under its own
//   id into its own slot, so the displaced object and the new one share an
//   id; the order matters.
// - Re-placing an id that lives elsewhere (another position or slot) moves
//   it: the old copy is removed first so an id is never in two places.
//
// `index_is_consistent()` checks both directions of that invariant and is
// what the tests lean on after arbitrary edit sequences.
//
// `BTreeMap` gives deterministic iteration, so `all_objects()`, floor lists
// and saved plans come out in position order.
//
// See also: `cell.rs` for per-slot storage, `placement.rs` for deciding
// whether a `place` call is legitimate.

use crate::cell::Cell;
use crate::object::{GameObject, Slot};
use crate::types::{Grid3, ObjectId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::debug;

/// Axis-aligned bounding box of occupied positions, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Grid3,
    pub max: Grid3,
}

#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: BTreeMap<Grid3, Cell>,
    index: FxHashMap<ObjectId, Grid3>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, position: Grid3) -> Option<&Cell> {
        self.cells.get(&position)
    }

    /// Install `obj` at its position, returning the occupant it displaced
    /// from its slot.
    pub fn place(&mut self, obj: GameObject) -> Option<GameObject> {
        let id = obj.id;
        let position = obj.position;

        // Same id somewhere other than the target slot: move it.
        if let Some(&old_position) = self.index.get(&id) {
            let same_slot = old_position == position
                && self
                    .cell(position)
                    .and_then(|c| c.get_by_slot(obj.slot))
                    .is_some_and(|o| o.id == id);
            if !same_slot {
                self.remove(id);
            }
        }

        let displaced = self
            .cells
            .entry(position)
            .or_insert_with(|| Cell::new(position))
            .place(obj);

        if let Some(d) = &displaced {
            self.index.remove(&d.id);
        }
        self.index.insert(id, position);

        debug!(%id, %position, displaced = ?displaced.as_ref().map(|d| d.id), "grid place");
        displaced
    }

    /// Remove an object by id. Empty cells are dropped.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        let position = *self.index.get(&id)?;
        let cell = self.cells.get_mut(&position)?;
        let removed = cell.remove_by_id(id)?;
        self.index.remove(&id);
        if cell.is_empty() {
            self.cells.remove(&position);
        }
        debug!(%id, %position, "grid remove");
        Some(removed)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&GameObject> {
        let position = self.index.get(&id)?;
        self.cells.get(position)?.get_by_id(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn position_of(&self, id: ObjectId) -> Option<Grid3> {
        self.index.get(&id).copied()
    }

    pub fn objects_at(&self, position: Grid3) -> SmallVec<[&GameObject; Slot::COUNT]> {
        self.cell(position).map(Cell::objects_vec).unwrap_or_default()
    }

    /// Every object, in position order then slot order.
    pub fn all_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.cells.values().flat_map(Cell::objects)
    }

    pub fn objects_on_floor(&self, y: i32) -> impl Iterator<Item = &GameObject> {
        self.cells
            .values()
            .filter(move |c| c.position().y == y)
            .flat_map(Cell::objects)
    }

    /// `None` when the grid is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut positions = self.cells.keys();
        let first = *positions.next()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in positions {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.min.z = bounds.min.z.min(p.z);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
            bounds.max.z = bounds.max.z.max(p.z);
        }
        Some(bounds)
    }

    /// Distinct Y levels with at least one object, ascending.
    pub fn floor_levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.cells.keys().map(|p| p.y).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }

    pub fn object_count(&self) -> usize {
        self.index.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every indexed id points at a cell that holds it, every stored object
    /// is indexed at its own position, and no stored cell is empty.
    pub fn index_is_consistent(&self) -> bool {
        let forward = self.index.iter().all(|(id, pos)| {
            self.cells
                .get(pos)
                .and_then(|c| c.get_by_id(*id))
                .is_some_and(|o| o.position == *pos)
        });
        let mut stored = 0usize;
        let backward = self.cells.iter().all(|(pos, cell)| {
            stored += cell.len();
            !cell.is_empty()
                && cell.position() == *pos
                && cell.objects().all(|o| self.index.get(&o.id) == Some(pos))
        });
        forward && backward && stored == self.index.len()
    }
}
