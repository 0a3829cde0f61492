// Plan validation reports.
//
// Where `placement.rs` answers "may I place this?", this module produces
// human-readable findings with a severity tier, for a checker panel or an
// import step:
//
// - `validate_placement` re-states the cell rules as a report: same-slot
//   occupant, exclusive occupant, or two face-blocking pieces at one position
//   are errors.
// - `record_clashes` / `validate_records` check a raw record list
//   (typically an import) for duplicate ids and for two records claiming the
//   same slot of the same position. A live `Grid` cannot hold either, so
//   this runs before records reach it. `BuildPlan::load_records` turns the
//   first clash into a `PlanError`.
// - `validate_grid` reports objects sharing a cell with an exclusive
//   occupant, which a grid can hold if it was loaded rather than edited.
// - `check_structural_support` warns when a non-structural piece has no
//   frame or wall in its cell.
//
// Findings are plain values; nothing here mutates anything.
//
// See also: `plan.rs` for where imports and `BuildPlan::validate` call in.

use crate::grid::Grid;
use crate::object::{CollisionType, GameObject, Slot};
use crate::types::{Grid3, ObjectId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How serious a finding is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub severity: Severity,
    pub message: String,
    /// The object the finding is about, if any.
    pub object_id: Option<ObjectId>,
}

impl ValidationResult {
    fn info(message: &str) -> Self {
        Self {
            severity: Severity::Info,
            message: message.to_string(),
            object_id: None,
        }
    }

    fn error(message: String, object_id: ObjectId) -> Self {
        Self {
            severity: Severity::Error,
            message,
            object_id: Some(object_id),
        }
    }

    /// Errors are the only findings that make a plan unbuildable.
    pub fn is_valid(&self) -> bool {
        self.severity != Severity::Error
    }
}

/// Report on placing `obj` into `grid` as it stands.
pub fn validate_placement(grid: &Grid, obj: &GameObject) -> ValidationResult {
    for other in grid.objects_at(obj.position) {
        if other.id == obj.id {
            continue;
        }
        if other.slot == obj.slot {
            return ValidationResult::error(
                format!("Position already contains a {:?} object", other.slot),
                other.id,
            );
        }
        if other.collision_type == CollisionType::ExclusiveCell {
            return ValidationResult::error(format!("Position is blocked by {}", other.variant), other.id);
        }
        if obj.collision_type == CollisionType::FaceBlocking
            && other.collision_type == CollisionType::FaceBlocking
        {
            return ValidationResult::error(format!("Position conflicts with {}", other.variant), other.id);
        }
    }
    ValidationResult::info("Placement valid")
}

/// A defect in a record list that a live `Grid` cannot represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordClash {
    DuplicateId(ObjectId),
    SlotCollision { id: ObjectId, position: Grid3, slot: Slot },
}

/// Duplicate ids and duplicate (position, slot) claims, in record order.
/// Every record after the first one to make a claim is reported.
pub fn record_clashes(records: &[GameObject]) -> Vec<RecordClash> {
    let mut clashes = Vec::new();
    let mut ids: FxHashSet<ObjectId> = FxHashSet::default();
    let mut claims: FxHashSet<(Grid3, Slot)> = FxHashSet::default();
    for obj in records {
        if !ids.insert(obj.id) {
            clashes.push(RecordClash::DuplicateId(obj.id));
        }
        if !claims.insert((obj.position, obj.slot)) {
            clashes.push(RecordClash::SlotCollision {
                id: obj.id,
                position: obj.position,
                slot: obj.slot,
            });
        }
    }
    clashes
}

/// `record_clashes` as findings, for an import preview.
pub fn validate_records(records: &[GameObject]) -> Vec<ValidationResult> {
    record_clashes(records)
        .into_iter()
        .map(|clash| match clash {
            RecordClash::DuplicateId(id) => ValidationResult::error(format!("Duplicate object id {id}"), id),
            RecordClash::SlotCollision { id, position, slot } => ValidationResult::error(
                format!("Duplicate {slot:?} objects at same position {position}"),
                id,
            ),
        })
        .collect()
}

/// Consistency findings for a whole grid.
pub fn validate_grid(grid: &Grid) -> Vec<ValidationResult> {
    let mut findings = Vec::new();
    for obj in grid.all_objects() {
        let shares_with_exclusive = grid
            .objects_at(obj.position)
            .iter()
            .any(|o| o.id != obj.id && (o.is_exclusive() || obj.is_exclusive()));
        if shares_with_exclusive {
            findings.push(ValidationResult::error(
                format!("{} shares position {} with an exclusive object", obj.variant, obj.position),
                obj.id,
            ));
        }
    }
    findings
}

pub fn check_structural_support(grid: &Grid, obj: &GameObject) -> ValidationResult {
    if obj.slot == Slot::Structural {
        return ValidationResult::info("Structural object");
    }
    let supported = grid
        .cell(obj.position)
        .is_some_and(|c| c.get_by_slot(Slot::Structural).is_some());
    if supported {
        ValidationResult::info("Has structural support")
    } else {
        ValidationResult {
            severity: Severity::Warning,
            message: "No structural support at this position".to_string(),
            object_id: Some(obj.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::WallFace;
    use crate::prng::IdRng;
    use crate::types::Rotation;
    use crate::variant::{CablePiece, CableVariant, DeviceVariant, FrameVariant, WallVariant};

    #[test]
    fn placement_report_mirrors_cell_rules() {
        let mut rng = IdRng::new(70);
        let mut grid = Grid::new();
        let p = Grid3::default();
        let r = Rotation::IDENTITY;
        let wall = GameObject::wall(ObjectId::new(&mut rng), WallVariant::Steel, p, WallFace::North, r);
        grid.place(wall.clone());

        let frame = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Steel, p, r);
        let report = validate_placement(&grid, &frame);
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.object_id, Some(wall.id));

        let cable = GameObject::cable(ObjectId::new(&mut rng), CableVariant::normal(CablePiece::Straight).unwrap(), p, r);
        let report = validate_placement(&grid, &cable);
        assert!(report.is_valid());
        assert_eq!(report.message, "Placement valid");
    }

    #[test]
    fn exclusive_occupant_is_an_error() {
        let mut rng = IdRng::new(71);
        let mut grid = Grid::new();
        let p = Grid3::default();
        let vent = GameObject::device(ObjectId::new(&mut rng), DeviceVariant::ActiveVent, p, Rotation::IDENTITY);
        grid.place(vent.clone());
        let cable = GameObject::cable(
            ObjectId::new(&mut rng),
            CableVariant::normal(CablePiece::Straight).unwrap(),
            p,
            Rotation::IDENTITY,
        );
        let report = validate_placement(&grid, &cable);
        assert_eq!(report.message, "Position is blocked by ActiveVent");

        // Force the bad state in directly, as a loaded file could.
        grid.place(cable.clone());
        let findings = validate_grid(&grid);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.severity == Severity::Error));
    }

    #[test]
    fn record_list_duplicates() {
        let mut rng = IdRng::new(72);
        let p = Grid3::default();
        let a = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Steel, p, Rotation::IDENTITY);
        let b = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Iron, p, Rotation::IDENTITY);
        let findings = validate_records(&[a.clone(), b.clone(), a.clone()]);
        // b collides with a on the slot; the second a is a duplicate id and
        // a slot collision.
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].object_id, Some(b.id));
        assert!(validate_records(&[a.clone()]).is_empty());

        let clashes = record_clashes(&[a.clone(), b.clone(), a.clone()]);
        assert_eq!(
            clashes[0],
            RecordClash::SlotCollision {
                id: b.id,
                position: p,
                slot: Slot::Structural,
            }
        );
        assert_eq!(clashes[1], RecordClash::DuplicateId(a.id));
    }

    #[test]
    fn structural_support_warning() {
        let mut rng = IdRng::new(73);
        let mut grid = Grid::new();
        let p = Grid3::new(0, 0, 0);
        let cable = GameObject::cable(
            ObjectId::new(&mut rng),
            CableVariant::normal(CablePiece::Straight).unwrap(),
            p,
            Rotation::IDENTITY,
        );
        assert_eq!(check_structural_support(&grid, &cable).severity, Severity::Warning);

        grid.place(GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Steel, p, Rotation::IDENTITY));
        assert_eq!(check_structural_support(&grid, &cable).severity, Severity::Info);

        let frame = GameObject::frame(ObjectId::new(&mut rng), FrameVariant::Steel, p, Rotation::IDENTITY);
        assert_eq!(check_structural_support(&grid, &frame).message, "Structural object");
    }
}
