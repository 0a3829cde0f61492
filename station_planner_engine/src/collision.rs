// Pairwise coexistence rules for objects sharing a grid position.
//
// Two predicates live here, used at different levels:
//
// - `can_coexist(a, b)` is the placement-level rule set, evaluated from slots
//   in priority order:
//   1. pipe + pipe (any network, insulated or not) never coexist;
//   2. cable + pipe always coexist;
//   3. cable + cable never coexist;
//   4. a chute conflicts with cables, pipes and other chutes;
//   5. otherwise same slot conflicts and different slots coexist.
//   A `false` here is where the auto-junction search in `transform.rs` gets
//   its chance.
//
// - `objects_conflict(a, b)` is the cell-level check `Cell::can_place` runs
//   against the occupant of the incoming object's slot. Two wall-family
//   pieces conflict only on the same face; an exclusive object conflicts
//   with anything; otherwise it reduces to same slot.
//
// Both are pure functions of the two records and never look at ids.
//
// See also: `cell.rs`, `placement.rs`.

use crate::object::{CollisionType, GameObject, ObjectType, Slot};

/// Whether `a` and `b` may occupy the same position. Symmetric.
pub fn can_coexist(a: &GameObject, b: &GameObject) -> bool {
    let a_pipe = a.slot.is_pipe();
    let b_pipe = b.slot.is_pipe();

    if a_pipe && b_pipe {
        return false;
    }
    if (a.slot == Slot::Cable && b_pipe) || (b.slot == Slot::Cable && a_pipe) {
        return true;
    }
    if a.slot == Slot::Cable && b.slot == Slot::Cable {
        return false;
    }
    if a.slot == Slot::Chute || b.slot == Slot::Chute {
        let other = if a.slot == Slot::Chute { b } else { a };
        if other.slot == Slot::Cable || other.slot.is_pipe() || other.slot == Slot::Chute {
            return false;
        }
    }
    a.slot != b.slot
}

/// Cell-level conflict between an occupant and an incoming object.
pub fn objects_conflict(a: &GameObject, b: &GameObject) -> bool {
    if a.object_type == ObjectType::Wall && b.object_type == ObjectType::Wall {
        return a.face == b.face;
    }
    if a.collision_type == CollisionType::ExclusiveCell || b.collision_type == CollisionType::ExclusiveCell {
        return true;
    }
    a.slot == b.slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::WallFace;
    use crate::prng::IdRng;
    use crate::types::{Grid3, ObjectId, Rotation};
    use crate::variant::{
        CableGrade, CablePiece, CableVariant, ChuteVariant, DeviceVariant, FrameVariant, PipePiece,
        PipeVariant, Variant, WallVariant,
    };

    /// One object of every variant at the origin.
    fn sample_objects() -> Vec<GameObject> {
        let mut rng = IdRng::new(11);
        Variant::all()
            .map(|v| GameObject::from_variant(ObjectId::new(&mut rng), v, Grid3::default(), Rotation::IDENTITY))
            .collect()
    }

    #[test]
    fn coexistence_is_symmetric() {
        let objs = sample_objects();
        // Every variant pair is a lot; one representative per slot and
        // collision class covers every rule.
        let reps: Vec<&GameObject> = objs
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 7 == 0)
            .map(|(_, o)| o)
            .collect();
        for a in &reps {
            for b in &objs {
                assert_eq!(can_coexist(a, b), can_coexist(b, a), "{} / {}", a.variant, b.variant);
            }
        }
    }

    #[test]
    fn pipes_never_coexist() {
        let objs = sample_objects();
        let pipes: Vec<&GameObject> = objs.iter().filter(|o| o.is_pipe()).collect();
        assert_eq!(pipes.len(), 40);
        for a in &pipes {
            for b in &pipes {
                assert!(!can_coexist(a, b));
            }
        }
    }

    #[test]
    fn cables_cross_pipes() {
        let objs = sample_objects();
        for cable in objs.iter().filter(|o| o.is_cable()) {
            for pipe in objs.iter().filter(|o| o.is_pipe()) {
                assert!(can_coexist(cable, pipe));
                assert!(can_coexist(pipe, cable));
            }
        }
    }

    #[test]
    fn chutes_block_lines_but_not_structure() {
        let mut rng = IdRng::new(12);
        let p = Grid3::default();
        let r = Rotation::IDENTITY;
        let chute = GameObject::chute(ObjectId::new(&mut rng), ChuteVariant::Straight, p, r);
        let cable = GameObject::cable(
            ObjectId::new(&mut rng),
            CableVariant::new(CableGrade::SuperHeavy, CablePiece::Straight3).unwrap(),
            p,
            r,
        );
        let pipe = GameObject::pipe(ObjectId::new(&mut rng), PipeVariant::liquid(PipePiece::Straight), p, r);
        let frame = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Iron, p, r);
        let other_chute = GameObject::chute(ObjectId::new(&mut rng), ChuteVariant::Bin, p, r);

        assert!(!can_coexist(&chute, &cable));
        assert!(!can_coexist(&chute, &pipe));
        assert!(!can_coexist(&chute, &other_chute));
        assert!(can_coexist(&chute, &frame));
    }

    #[test]
    fn different_slots_coexist_same_slots_do_not() {
        let mut rng = IdRng::new(13);
        let p = Grid3::default();
        let r = Rotation::IDENTITY;
        let frame = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Steel, p, r);
        let wall = GameObject::wall(ObjectId::new(&mut rng), WallVariant::Steel, p, WallFace::North, r);
        let cable = GameObject::cable(ObjectId::new(&mut rng), CableVariant::normal(CablePiece::Straight).unwrap(), p, r);
        assert!(can_coexist(&frame, &cable));
        assert!(!can_coexist(&frame, &wall));
    }

    #[test]
    fn walls_conflict_only_on_the_same_face() {
        let mut rng = IdRng::new(14);
        let p = Grid3::default();
        let r = Rotation::IDENTITY;
        let north = GameObject::wall(ObjectId::new(&mut rng), WallVariant::Steel, p, WallFace::North, r);
        let east = GameObject::wall(ObjectId::new(&mut rng), WallVariant::Window, p, WallFace::East, r);
        let north_door = GameObject::wall(ObjectId::new(&mut rng), WallVariant::Door, p, WallFace::North, r);
        assert!(!objects_conflict(&north, &east));
        assert!(objects_conflict(&north, &north_door));
    }

    #[test]
    fn exclusive_objects_conflict_with_everything() {
        let mut rng = IdRng::new(15);
        let p = Grid3::default();
        let r = Rotation::IDENTITY;
        let battery = GameObject::device(ObjectId::new(&mut rng), DeviceVariant::BatterySmall, p, r);
        let cable = GameObject::cable(ObjectId::new(&mut rng), CableVariant::normal(CablePiece::Straight).unwrap(), p, r);
        assert!(objects_conflict(&battery, &cable));
        assert!(objects_conflict(&cable, &battery));
    }
}
