// Placement facade: "can this go here, and what would placing it produce?"
//
// `can_place(grid, obj)` walks the occupants at `obj.position` and returns a
// `PlacementCheck`:
//
// - `EmptyCell`: nothing there, place as-is.
// - `Clear`: occupants exist but all coexist with `obj`.
// - `Transform`: `obj` collides with a pipe or cable of its own type and the two
//   merge into one piece (`transform.rs`). The existing occupant is reshaped
//   in place, keeping its id, position and paint.
// - `Blocked`: a hard conflict, with the reason and the occupant at fault.
//
// Ordering is fixed: an exclusive occupant blocks before any pairwise rule
// runs, then an exclusive newcomer is blocked by any occupant, then
// occupants are checked in slot order against `collision::can_coexist` and
// the first failure decides. An occupant with the newcomer's own id is
// skipped, so re-checking an object that is already placed (a move) does not
// collide with itself.
//
// Nothing here mutates the grid. `PlacementCheck::resolve` turns a check into
// the object that should actually be installed; `plan.rs` does the install
// through a command so it can be undone.
//
// See also: `collision.rs`, `transform.rs`, `command.rs`.

use crate::collision::can_coexist;
use crate::grid::Grid;
use crate::object::{GameObject, ObjectType, Slot};
use crate::transform::{TransformResult, calculate_transform};
use crate::types::Grid3;
use crate::variant::PipeNetwork;
use std::fmt;
use tracing::trace;

/// Why a placement is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// The cell holds an exclusive object.
    ExclusiveOccupant,
    /// The newcomer is exclusive and the cell is not empty.
    CellNotEmpty,
    /// Pairwise rule failure with no transform available.
    Conflict { incoming: ObjectType, existing: ObjectType },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::ExclusiveOccupant => f.write_str("Position blocked by exclusive object"),
            BlockReason::CellNotEmpty => f.write_str("Exclusive object requires an empty position"),
            BlockReason::Conflict { incoming, existing } => {
                write!(f, "Cannot place {incoming} - conflicts with existing {existing}")
            }
        }
    }
}

/// Outcome of a placement check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementCheck {
    EmptyCell,
    Clear,
    Transform {
        replaces: GameObject,
        result: TransformResult,
    },
    Blocked {
        reason: BlockReason,
        conflicting: GameObject,
    },
}

impl PlacementCheck {
    pub fn can_place(&self) -> bool {
        !matches!(self, PlacementCheck::Blocked { .. })
    }

    pub fn reason(&self) -> Option<BlockReason> {
        match self {
            PlacementCheck::Blocked { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn conflicting_object(&self) -> Option<&GameObject> {
        match self {
            PlacementCheck::Blocked { conflicting, .. } => Some(conflicting),
            _ => None,
        }
    }

    pub fn suggested_transform(&self) -> Option<&TransformResult> {
        match self {
            PlacementCheck::Transform { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The object to install for `incoming`, or `None` if blocked.
    pub fn resolve(&self, incoming: &GameObject) -> Option<GameObject> {
        match self {
            PlacementCheck::EmptyCell | PlacementCheck::Clear => Some(incoming.clone()),
            PlacementCheck::Transform { replaces, result } => Some(GameObject {
                variant: result.variant,
                rotation: result.rotation,
                ..replaces.clone()
            }),
            PlacementCheck::Blocked { .. } => None,
        }
    }
}

pub fn can_place(grid: &Grid, obj: &GameObject) -> PlacementCheck {
    let occupants = grid.objects_at(obj.position);
    if occupants.is_empty() {
        return PlacementCheck::EmptyCell;
    }
    let others = || occupants.iter().copied().filter(|o| o.id != obj.id);

    if let Some(exclusive) = others().find(|o| o.is_exclusive()) {
        return blocked(BlockReason::ExclusiveOccupant, exclusive);
    }
    if obj.is_exclusive() {
        if let Some(first) = others().next() {
            return blocked(BlockReason::CellNotEmpty, first);
        }
    }

    for existing in others() {
        if can_coexist(existing, obj) {
            continue;
        }
        if let Some(result) = calculate_transform(existing, obj) {
            trace!(existing = %existing.id, to = %result.variant, "placement resolves by transform");
            return PlacementCheck::Transform {
                replaces: existing.clone(),
                result,
            };
        }
        return blocked(
            BlockReason::Conflict {
                incoming: obj.object_type,
                existing: existing.object_type,
            },
            existing,
        );
    }
    PlacementCheck::Clear
}

fn blocked(reason: BlockReason, conflicting: &GameObject) -> PlacementCheck {
    trace!(%reason, conflicting = %conflicting.id, "placement blocked");
    PlacementCheck::Blocked {
        reason,
        conflicting: conflicting.clone(),
    }
}

/// Occupants at `obj`'s position that fail `can_coexist` against it.
pub fn get_conflicts<'g>(grid: &'g Grid, obj: &GameObject) -> Vec<&'g GameObject> {
    grid.objects_at(obj.position)
        .into_iter()
        .filter(|o| o.id != obj.id && !can_coexist(o, obj))
        .collect()
}

/// Whether an exclusive object occupies `position`.
pub fn is_position_blocked(grid: &Grid, position: Grid3) -> bool {
    grid.cell(position).is_some_and(|c| c.has_exclusive())
}

pub fn slot_for_pipe(network: PipeNetwork) -> Slot {
    Slot::for_pipe_network(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::IdRng;
    use crate::types::{ObjectId, Rotation};
    use crate::variant::{
        CablePiece, CableVariant, ChuteVariant, DeviceVariant, FrameVariant, PipePiece, PipeVariant, Variant,
    };

    struct Bench {
        rng: IdRng,
        grid: Grid,
        at: Grid3,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                rng: IdRng::new(50),
                grid: Grid::new(),
                at: Grid3::new(10, 0, 10),
            }
        }

        fn id(&mut self) -> ObjectId {
            ObjectId::new(&mut self.rng)
        }

        fn gas(&mut self, piece: PipePiece, yaw: i32) -> GameObject {
            let id = self.id();
            GameObject::pipe(id, PipeVariant::gas(piece), self.at, Rotation::yaw(yaw))
        }

        fn cable(&mut self) -> GameObject {
            let id = self.id();
            GameObject::cable(id, CableVariant::normal(CablePiece::Straight).unwrap(), self.at, Rotation::IDENTITY)
        }
    }

    #[test]
    fn empty_cell() {
        let mut b = Bench::new();
        let pipe = b.gas(PipePiece::Straight, 0);
        assert_eq!(can_place(&b.grid, &pipe), PlacementCheck::EmptyCell);
        assert!(can_place(&b.grid, &pipe).can_place());
    }

    #[test]
    fn cable_over_pipe_is_clear() {
        let mut b = Bench::new();
        let pipe = b.gas(PipePiece::Straight, 0);
        b.grid.place(pipe);
        let cable = b.cable();
        assert_eq!(can_place(&b.grid, &cable), PlacementCheck::Clear);
    }

    #[test]
    fn perpendicular_pipe_suggests_transform() {
        let mut b = Bench::new();
        let existing = b.gas(PipePiece::Straight, 0).with_color(crate::object::PaintColor::Orange);
        b.grid.place(existing.clone());
        let incoming = b.gas(PipePiece::Straight, 90);
        let check = can_place(&b.grid, &incoming);
        assert!(check.can_place());
        let suggestion = check.suggested_transform().unwrap();
        assert_eq!(suggestion.variant, Variant::Pipe(PipeVariant::gas(PipePiece::Cross4)));

        let resolved = check.resolve(&incoming).unwrap();
        assert_eq!(resolved.id, existing.id);
        assert_eq!(resolved.position, existing.position);
        assert_eq!(resolved.color, existing.color);
        assert_eq!(resolved.variant, suggestion.variant);
    }

    #[test]
    fn chute_on_cable_reports_the_cable() {
        let mut b = Bench::new();
        let cable = b.cable();
        b.grid.place(cable.clone());
        let id = b.id();
        let chute = GameObject::chute(id, ChuteVariant::Straight, b.at, Rotation::IDENTITY);
        let check = can_place(&b.grid, &chute);
        assert!(!check.can_place());
        assert_eq!(check.conflicting_object(), Some(&cable));
        assert_eq!(
            check.reason().map(|r| r.to_string()).as_deref(),
            Some("Cannot place chute - conflicts with existing cable")
        );
        assert_eq!(check.resolve(&chute), None);
        assert_eq!(get_conflicts(&b.grid, &chute), vec![&cable]);
    }

    #[test]
    fn exclusive_occupant_short_circuits() {
        let mut b = Bench::new();
        let id = b.id();
        let battery = GameObject::device(id, DeviceVariant::BatteryLarge, b.at, Rotation::IDENTITY);
        b.grid.place(battery.clone());
        let cable = b.cable();
        let check = can_place(&b.grid, &cable);
        assert_eq!(check.reason(), Some(BlockReason::ExclusiveOccupant));
        assert_eq!(check.conflicting_object(), Some(&battery));
        assert!(is_position_blocked(&b.grid, b.at));
        assert!(!is_position_blocked(&b.grid, Grid3::default()));
        // Cable and battery are in different slots, so the slot rule alone
        // would not report it.
        assert!(get_conflicts(&b.grid, &cable).is_empty());
    }

    #[test]
    fn exclusive_newcomer_needs_empty_cell() {
        let mut b = Bench::new();
        let cable = b.cable();
        b.grid.place(cable.clone());
        let id = b.id();
        let panel = GameObject::device(id, DeviceVariant::SolarPanel, b.at, Rotation::IDENTITY);
        let check = can_place(&b.grid, &panel);
        assert_eq!(check.reason(), Some(BlockReason::CellNotEmpty));
        assert_eq!(check.conflicting_object(), Some(&cable));
    }

    #[test]
    fn liquid_over_gas_reshapes_the_gas_pipe() {
        let mut b = Bench::new();
        let gas = b.gas(PipePiece::Straight, 0);
        b.grid.place(gas.clone());
        let id = b.id();
        let liquid = GameObject::pipe(id, PipeVariant::liquid(PipePiece::Straight), b.at, Rotation::yaw(90));
        let check = can_place(&b.grid, &liquid);
        assert!(matches!(check, PlacementCheck::Transform { ref replaces, .. } if *replaces == gas));
        let resolved = check.resolve(&liquid).unwrap();
        assert_eq!(resolved.id, gas.id);
        assert_eq!(resolved.variant, Variant::Pipe(PipeVariant::gas(PipePiece::Cross4)));
        assert_eq!(get_conflicts(&b.grid, &liquid), vec![&gas]);
    }

    #[test]
    fn own_id_is_skipped() {
        let mut b = Bench::new();
        let pipe = b.gas(PipePiece::Straight, 0);
        b.grid.place(pipe.clone());
        assert!(can_place(&b.grid, &pipe).can_place());
        assert!(get_conflicts(&b.grid, &pipe).is_empty());
    }

    #[test]
    fn frame_then_pipe_is_clear() {
        let mut b = Bench::new();
        let id = b.id();
        b.grid.place(GameObject::frame(id, FrameVariant::Steel, b.at, Rotation::IDENTITY));
        let pipe = b.gas(PipePiece::Corner, 0);
        assert_eq!(can_place(&b.grid, &pipe), PlacementCheck::Clear);
    }

    #[test]
    fn pipe_slots_by_network() {
        assert_eq!(slot_for_pipe(PipeNetwork::Gas), Slot::GasPipe);
        assert_eq!(slot_for_pipe(PipeNetwork::Liquid), Slot::LiquidPipe);
    }
}
