// Auto-junction search: merge two overlapping pieces into one.
//
// When a pipe or cable is placed on top of an existing piece of the same
// type, the game replaces the pair with a single piece whose connectors are
// the union of both. `calculate_transform` reproduces that:
//
// 1. Both objects must be pipes or both cables. Nothing else is compared up
//    front: a gas pipe dropped on a liquid pipe, or a heavy cable on a
//    normal one, still merges.
// 2. Each object's canonical pattern is rotated by its own yaw.
// 3. The two rotated patterns are OR-merged.
// 4. The existing object's table (`connection.rs`) is walked in order.
//    Shapes whose connector count differs from the merged count are
//    skipped; the rest are tried at yaw 0, 90, 180, 270. The first exact
//    match wins.
// 5. The matching shape is re-applied to the existing object's family
//    (network and insulation, or grade), so the result always belongs to
//    the piece that was already there.
//
// No match is the normal "cannot merge" outcome and is returned as `None`.
// Identical pieces are not special-cased: their merged pattern is their own
// pattern, and the search finds it like any other.
//
// See also: `connection.rs` for the tables and rotation, `placement.rs` for
// the caller that turns a transform into a placement suggestion.

use crate::connection::{
    ConnectionFamily, ConnectionPattern, apply_rotation, count_connections, merge_patterns,
};
use crate::object::GameObject;
use crate::types::Rotation;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The variant and rotation a merged piece should take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    pub variant: Variant,
    pub rotation: Rotation,
}

/// The object's connection pattern in world orientation, if its variant has
/// one.
pub fn object_pattern(obj: &GameObject) -> Option<ConnectionPattern> {
    let family = ConnectionFamily::of(&obj.variant)?;
    let shape = obj.variant.shape_key()?;
    let base = family.base_pattern(shape)?;
    Some(apply_rotation(&base, obj.rotation))
}

/// Search `template`'s family table for a shape and yaw that produce
/// exactly `pattern`. The result keeps `template`'s family.
pub fn find_variant_for_pattern(pattern: &ConnectionPattern, template: &Variant) -> Option<TransformResult> {
    let family = ConnectionFamily::of(template)?;
    let wanted = count_connections(pattern);

    for (shape, base) in family.table() {
        if count_connections(base) != wanted {
            continue;
        }
        for yaw in [0, 90, 180, 270] {
            let rotation = Rotation::yaw(yaw);
            if apply_rotation(base, rotation) != *pattern {
                continue;
            }
            // A shape the family doesn't offer can't be the answer; keep
            // searching rather than giving up.
            let Some(variant) = template.with_shape(*shape) else {
                trace!(%shape, "shape matched but family has no such piece");
                continue;
            };
            trace!(%variant, yaw, "transform match");
            return Some(TransformResult { variant, rotation });
        }
    }
    trace!(?pattern, "no transform for merged pattern");
    None
}

/// The piece that results from placing `incoming` over `existing`, or
/// `None` if the two cannot merge.
pub fn calculate_transform(existing: &GameObject, incoming: &GameObject) -> Option<TransformResult> {
    if existing.object_type != incoming.object_type {
        return None;
    }
    let existing_pattern = object_pattern(existing)?;
    let incoming_pattern = object_pattern(incoming)?;
    let merged = merge_patterns(&existing_pattern, &incoming_pattern);
    find_variant_for_pattern(&merged, &existing.variant)
}

pub fn can_transform(existing: &GameObject, incoming: &GameObject) -> bool {
    calculate_transform(existing, incoming).is_some()
}
