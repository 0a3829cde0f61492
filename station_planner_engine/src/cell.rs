// A single grid position and its per-slot occupants.
//
// A `Cell` holds at most one object per `Slot`, stored in a fixed array
// indexed by `Slot::index()`. Cells are created and destroyed only by
// `Grid`; nothing else owns one.
//
// `can_place` is the cell-level legality check: an exclusive occupant blocks
// everything, an exclusive newcomer needs the cell to itself, and otherwise
// the occupant of the newcomer's slot must not conflict with it
// (`collision::objects_conflict`). `place` does *not* re-check; it installs
// unconditionally and hands back whatever it displaced, because the decision
// of whether displacement is legitimate (an auto-junction, say) belongs to
// the placement layer.
//
// See also: `grid.rs` for the owner, `collision.rs` for the pairwise rule.

use crate::collision::objects_conflict;
use crate::object::{GameObject, Slot};
use crate::types::{Grid3, ObjectId};
use smallvec::SmallVec;

/// Occupants of one grid position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    position: Grid3,
    slots: [Option<GameObject>; Slot::COUNT],
}

impl Cell {
    pub fn new(position: Grid3) -> Self {
        Self {
            position,
            slots: Default::default(),
        }
    }

    pub fn position(&self) -> Grid3 {
        self.position
    }

    /// Whether `obj` may go into this cell. Occupants with `obj`'s own id
    /// are ignored so an object can be re-placed in its own cell.
    pub fn can_place(&self, obj: &GameObject) -> bool {
        let mut others = self.objects().filter(|o| o.id != obj.id).peekable();
        if obj.is_exclusive() && others.peek().is_some() {
            return false;
        }
        if others.any(|o| o.is_exclusive()) {
            return false;
        }
        match self.get_by_slot(obj.slot) {
            Some(existing) if existing.id != obj.id => !objects_conflict(existing, obj),
            _ => true,
        }
    }

    /// Install `obj` in its slot, returning the previous occupant.
    pub fn place(&mut self, obj: GameObject) -> Option<GameObject> {
        self.slots[obj.slot.index()].replace(obj)
    }

    pub fn remove_by_slot(&mut self, slot: Slot) -> Option<GameObject> {
        self.slots[slot.index()].take()
    }

    pub fn remove_by_id(&mut self, id: ObjectId) -> Option<GameObject> {
        self.slots
            .iter_mut()
            .find(|s| s.as_ref().is_some_and(|o| o.id == id))
            .and_then(Option::take)
    }

    pub fn get_by_slot(&self, slot: Slot) -> Option<&GameObject> {
        self.slots[slot.index()].as_ref()
    }

    pub fn get_by_id(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects().find(|o| o.id == id)
    }

    /// Occupants in slot order.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter().flatten()
    }

    pub fn objects_vec(&self) -> SmallVec<[&GameObject; Slot::COUNT]> {
        self.objects().collect()
    }

    pub fn has_exclusive(&self) -> bool {
        self.objects().any(GameObject::is_exclusive)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::WallFace;
    use crate::prng::IdRng;
    use crate::types::Rotation;
    use crate::variant::{
        CablePiece, CableVariant, DeviceVariant, FrameVariant, PipePiece, PipeVariant, WallVariant,
    };

    struct Fixture {
        rng: IdRng,
        pos: Grid3,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rng: IdRng::new(30),
                pos: Grid3::new(20, 0, 20),
            }
        }

        fn frame(&mut self) -> GameObject {
            GameObject::frame(ObjectId::new(&mut self.rng), FrameVariant::Steel, self.pos, Rotation::IDENTITY)
        }

        fn gas(&mut self, piece: PipePiece) -> GameObject {
            GameObject::pipe(ObjectId::new(&mut self.rng), PipeVariant::gas(piece), self.pos, Rotation::IDENTITY)
        }

        fn cable(&mut self) -> GameObject {
            GameObject::cable(
                ObjectId::new(&mut self.rng),
                CableVariant::normal(CablePiece::Straight).unwrap(),
                self.pos,
                Rotation::IDENTITY,
            )
        }

        fn wall(&mut self, face: WallFace) -> GameObject {
            GameObject::wall(ObjectId::new(&mut self.rng), WallVariant::Steel, self.pos, face, Rotation::IDENTITY)
        }

        fn battery(&mut self) -> GameObject {
            GameObject::device(
                ObjectId::new(&mut self.rng),
                DeviceVariant::BatterySmall,
                self.pos,
                Rotation::IDENTITY,
            )
        }
    }

    #[test]
    fn place_returns_displaced_occupant() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        let first = f.gas(PipePiece::Straight);
        let second = f.gas(PipePiece::Corner);
        assert_eq!(cell.place(first.clone()), None);
        assert_eq!(cell.place(second.clone()), Some(first));
        assert_eq!(cell.len(), 1);
        assert_eq!(cell.get_by_slot(Slot::GasPipe), Some(&second));
    }

    #[test]
    fn different_slots_share_a_cell() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        let frame = f.frame();
        let pipe = f.gas(PipePiece::Straight);
        let cable = f.cable();
        for obj in [&frame, &pipe, &cable] {
            assert!(cell.can_place(obj));
            cell.place(obj.clone());
        }
        assert_eq!(cell.len(), 3);
        let ids: Vec<ObjectId> = cell.objects_vec().iter().map(|o| o.id).collect();
        // Slot order: structural, cable, gas pipe.
        assert_eq!(ids, vec![frame.id, cable.id, pipe.id]);
    }

    #[test]
    fn same_slot_is_rejected() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        cell.place(f.gas(PipePiece::Straight));
        assert!(!cell.can_place(&f.gas(PipePiece::Corner)));
    }

    #[test]
    fn walls_on_other_faces_pass_the_cell_check() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        cell.place(f.wall(WallFace::North));
        assert!(cell.can_place(&f.wall(WallFace::East)));
        assert!(!cell.can_place(&f.wall(WallFace::North)));
    }

    #[test]
    fn exclusive_occupant_blocks_every_slot() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        cell.place(f.battery());
        assert!(!cell.can_place(&f.cable()));
        assert!(!cell.can_place(&f.frame()));
    }

    #[test]
    fn exclusive_newcomer_needs_an_empty_cell() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        let battery = f.battery();
        assert!(cell.can_place(&battery));
        cell.place(f.cable());
        assert!(!cell.can_place(&battery));
    }

    #[test]
    fn own_id_does_not_block() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        let battery = f.battery();
        cell.place(battery.clone());
        assert!(cell.can_place(&battery));
    }

    #[test]
    fn removal_by_slot_and_id() {
        let mut f = Fixture::new();
        let mut cell = Cell::new(f.pos);
        let frame = f.frame();
        let cable = f.cable();
        cell.place(frame.clone());
        cell.place(cable.clone());

        assert_eq!(cell.remove_by_id(cable.id), Some(cable.clone()));
        assert_eq!(cell.remove_by_id(cable.id), None);
        assert_eq!(cell.get_by_id(frame.id), Some(&frame));
        assert_eq!(cell.remove_by_slot(Slot::Structural), Some(frame));
        assert!(cell.is_empty());
        assert!(!cell.has_exclusive());
    }
}
