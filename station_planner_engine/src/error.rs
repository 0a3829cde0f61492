// Errors at the serialization boundary.
//
// Placement itself never fails with an error: conflicts, missing
// transforms and empty undo history are ordinary result values. `PlanError`
// only covers data coming in from outside (a saved plan, a config file)
// that cannot be loaded as-is.

use crate::object::Slot;
use crate::types::{Grid3, ObjectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate object id {0}")]
    DuplicateId(ObjectId),
    #[error("two objects claim the {slot:?} slot at {position}")]
    SlotCollision { position: Grid3, slot: Slot },
    #[error("object {0} has a type, slot or collision class that does not match its variant")]
    InconsistentRecord(ObjectId),
}
