// Connection patterns: which of the six world directions a piece connects to.
//
// Every pipe and cable shape has a canonical `ConnectionPattern` in its
// unrotated orientation. A straight runs along Z; a corner connects +X and
// -Z. Placing a piece with a yaw rotates the pattern about Y; `rotate_y90`
// is one quarter turn, mapping +Z → +X → -Z → -X → +Z and leaving +Y/-Y alone.
//
// Pipes and cables have separate, ordered tables (`PIPE_PATTERNS`,
// `CABLE_PATTERNS`). Table order matters: the auto-junction search in
// `transform.rs` walks a table front to back and takes the first match, so a
// pipe T-junction is found before the identically-shaped `Cross3`.
//
// Only yaw is modelled. Pitch and roll on a pipe or cable are ignored by
// `apply_rotation`.
//
// See also: `variant.rs` for `ShapeKey` and the variant → shape table,
// `transform.rs` for the search that consumes these tables.

use crate::types::Rotation;
use crate::variant::{ShapeKey, Variant};
use serde::{Deserialize, Serialize};

/// One of the six axis-aligned world directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];
}

/// Connector exposure in each world direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPattern {
    pub pos_x: bool,
    pub neg_x: bool,
    pub pos_y: bool,
    pub neg_y: bool,
    pub pos_z: bool,
    pub neg_z: bool,
}

impl ConnectionPattern {
    pub const EMPTY: ConnectionPattern = ConnectionPattern::new(false, false, false, false, false, false);

    pub const fn new(pos_x: bool, neg_x: bool, pos_y: bool, neg_y: bool, pos_z: bool, neg_z: bool) -> Self {
        Self {
            pos_x,
            neg_x,
            pos_y,
            neg_y,
            pos_z,
            neg_z,
        }
    }

    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::PosX => self.pos_x,
            Direction::NegX => self.neg_x,
            Direction::PosY => self.pos_y,
            Direction::NegY => self.neg_y,
            Direction::PosZ => self.pos_z,
            Direction::NegZ => self.neg_z,
        }
    }

    /// Pattern with exactly the given directions set.
    pub fn from_directions(dirs: &[Direction]) -> Self {
        let mut p = Self::EMPTY;
        for dir in dirs {
            match dir {
                Direction::PosX => p.pos_x = true,
                Direction::NegX => p.neg_x = true,
                Direction::PosY => p.pos_y = true,
                Direction::NegY => p.neg_y = true,
                Direction::PosZ => p.pos_z = true,
                Direction::NegZ => p.neg_z = true,
            }
        }
        p
    }
}

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------

const STRAIGHT: ConnectionPattern = ConnectionPattern::new(false, false, false, false, true, true);
const CORNER: ConnectionPattern = ConnectionPattern::new(true, false, false, false, false, true);
const THREE_WAY: ConnectionPattern = ConnectionPattern::new(true, false, false, false, true, true);
const FOUR_WAY: ConnectionPattern = ConnectionPattern::new(true, true, false, false, true, true);
const FIVE_WAY: ConnectionPattern = ConnectionPattern::new(true, true, true, false, true, true);
const SIX_WAY: ConnectionPattern = ConnectionPattern::new(true, true, true, true, true, true);

/// Pipe shapes in search order.
pub const PIPE_PATTERNS: [(ShapeKey, ConnectionPattern); 7] = [
    (ShapeKey::Straight, STRAIGHT),
    (ShapeKey::Corner, CORNER),
    (ShapeKey::TJunction, THREE_WAY),
    (ShapeKey::Cross3, THREE_WAY),
    (ShapeKey::Cross4, FOUR_WAY),
    (ShapeKey::Cross5, FIVE_WAY),
    (ShapeKey::Cross6, SIX_WAY),
];

/// Cable shapes in search order.
pub const CABLE_PATTERNS: [(ShapeKey, ConnectionPattern); 8] = [
    (ShapeKey::Straight, STRAIGHT),
    (ShapeKey::Corner, CORNER),
    (ShapeKey::Corner3, THREE_WAY),
    (ShapeKey::Corner4, FOUR_WAY),
    (ShapeKey::Junction, THREE_WAY),
    (ShapeKey::Junction4, FOUR_WAY),
    (ShapeKey::Junction5, FIVE_WAY),
    (ShapeKey::Junction6, SIX_WAY),
];

/// Which pattern table a piece draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionFamily {
    Pipe,
    Cable,
}

impl ConnectionFamily {
    /// The family of a variant, if it takes part in auto-junctions.
    pub fn of(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Pipe(_) => Some(ConnectionFamily::Pipe),
            Variant::Cable(_) => Some(ConnectionFamily::Cable),
            _ => None,
        }
    }

    pub fn table(self) -> &'static [(ShapeKey, ConnectionPattern)] {
        match self {
            ConnectionFamily::Pipe => &PIPE_PATTERNS,
            ConnectionFamily::Cable => &CABLE_PATTERNS,
        }
    }

    /// Canonical pattern for a shape in this family's table.
    pub fn base_pattern(self, shape: ShapeKey) -> Option<ConnectionPattern> {
        self.table()
            .iter()
            .find(|(key, _)| *key == shape)
            .map(|(_, pattern)| *pattern)
    }
}

/// Canonical pattern for a shape key, pipe table first, then cable table.
/// Shapes in neither table (there are none today) return `None`.
pub fn base_pattern(shape: ShapeKey) -> Option<ConnectionPattern> {
    ConnectionFamily::Pipe
        .base_pattern(shape)
        .or_else(|| ConnectionFamily::Cable.base_pattern(shape))
}

/// Canonical shape key for a prefab name. Unknown prefabs and prefabs
/// without a connector shape return `None`.
pub fn shape_key_for_prefab(prefab: &str) -> Option<ShapeKey> {
    Variant::from_prefab(prefab).and_then(|v| v.shape_key())
}

// ---------------------------------------------------------------------------
// Pattern operations
// ---------------------------------------------------------------------------

pub fn count_connections(pattern: &ConnectionPattern) -> usize {
    Direction::ALL.iter().filter(|d| pattern.has(**d)).count()
}

/// Direction-wise OR.
pub fn merge_patterns(a: &ConnectionPattern, b: &ConnectionPattern) -> ConnectionPattern {
    ConnectionPattern {
        pos_x: a.pos_x || b.pos_x,
        neg_x: a.neg_x || b.neg_x,
        pos_y: a.pos_y || b.pos_y,
        neg_y: a.neg_y || b.neg_y,
        pos_z: a.pos_z || b.pos_z,
        neg_z: a.neg_z || b.neg_z,
    }
}

/// One quarter turn about Y: +Z → +X → -Z → -X → +Z.
pub fn rotate_y90(p: &ConnectionPattern) -> ConnectionPattern {
    ConnectionPattern {
        pos_x: p.pos_z,
        neg_x: p.neg_z,
        pos_y: p.pos_y,
        neg_y: p.neg_y,
        pos_z: p.neg_x,
        neg_z: p.pos_x,
    }
}

/// Rotate by the yaw component of `rotation`.
pub fn apply_rotation(pattern: &ConnectionPattern, rotation: Rotation) -> ConnectionPattern {
    (0..rotation.yaw_steps()).fold(*pattern, |acc, _| rotate_y90(&acc))
}
