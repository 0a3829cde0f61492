// The placeable object record and its classification enums.
//
// A `GameObject` is plain data: identity, prefab variant, grid position,
// rotation, optional paint, and the two fields that drive placement legality,
// `collision_type` and `slot`. Behavior lives elsewhere (`collision.rs`,
// `transform.rs`, `cell.rs`); this file only fixes *which* classification a
// given variant gets.
//
// Objects are built by the factories below, which derive `object_type`,
// `slot` and `collision_type` from the variant:
//
// | Family  | Collision     | Slot                 | Grid  |
// |---------|---------------|----------------------|-------|
// | Frame   | SlotSharing   | Structural           | Main  |
// | Wall    | FaceBlocking  | Structural (+ face)  | Main  |
// | Pipe    | SlotSharing   | GasPipe / LiquidPipe | Small |
// | Cable   | SlotSharing   | Cable                | Small |
// | Chute   | SlotSharing   | Chute                | Small |
// | Device  | ExclusiveCell | Device               | Main  |
//
// Records arriving through deserialization may disagree with that table;
// `is_consistent()` reports whether they do, and the session import rejects
// records that don't.
//
// See also: `variant.rs` for the prefab sum type, `types.rs` for `Grid3`,
// `Rotation` and `ObjectId`.

use crate::types::{Grid3, GridType, ObjectId, Rotation};
use crate::variant::{
    CableVariant, ChuteVariant, DeviceVariant, FrameVariant, PipeNetwork, PipeVariant, Variant,
    WallVariant,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Classification enums
// ---------------------------------------------------------------------------

/// Coarse object category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Frame,
    Wall,
    Pipe,
    Cable,
    Chute,
    Device,
}

impl ObjectType {
    /// Pipes, cables and chutes sit on the small grid.
    pub fn grid_type(self) -> GridType {
        match self {
            ObjectType::Pipe | ObjectType::Cable | ObjectType::Chute => GridType::Small,
            ObjectType::Frame | ObjectType::Wall | ObjectType::Device => GridType::Main,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Frame => "frame",
            ObjectType::Wall => "wall",
            ObjectType::Pipe => "pipe",
            ObjectType::Cable => "cable",
            ObjectType::Chute => "chute",
            ObjectType::Device => "device",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an object interacts with other occupants of its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionType {
    /// Sole occupant of its cell; nothing else in any slot.
    ExclusiveCell,
    /// Occupies one face of the cell (walls, windows, doors).
    FaceBlocking,
    /// Coexists with occupants of other slots.
    SlotSharing,
}

/// Sub-position channel within a cell. At most one occupant per slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Structural,
    Cable,
    GasPipe,
    LiquidPipe,
    Chute,
    Device,
}

impl Slot {
    pub const COUNT: usize = 6;

    pub const ALL: [Slot; Slot::COUNT] = [
        Slot::Structural,
        Slot::Cable,
        Slot::GasPipe,
        Slot::LiquidPipe,
        Slot::Chute,
        Slot::Device,
    ];

    /// Dense index for per-cell slot arrays.
    pub const fn index(self) -> usize {
        match self {
            Slot::Structural => 0,
            Slot::Cable => 1,
            Slot::GasPipe => 2,
            Slot::LiquidPipe => 3,
            Slot::Chute => 4,
            Slot::Device => 5,
        }
    }

    pub fn is_pipe(self) -> bool {
        matches!(self, Slot::GasPipe | Slot::LiquidPipe)
    }

    /// The pipe network a slot carries, if it is a pipe slot.
    pub fn pipe_network(self) -> Option<PipeNetwork> {
        match self {
            Slot::GasPipe => Some(PipeNetwork::Gas),
            Slot::LiquidPipe => Some(PipeNetwork::Liquid),
            _ => None,
        }
    }

    pub fn for_pipe_network(network: PipeNetwork) -> Slot {
        match network {
            PipeNetwork::Gas => Slot::GasPipe,
            PipeNetwork::Liquid => Slot::LiquidPipe,
        }
    }
}

/// Which face of a cell a wall-family piece covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WallFace {
    North,
    South,
    East,
    West,
    Top,
    Bottom,
}

/// The game's paint colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintColor {
    Black,
    Blue,
    Brown,
    Green,
    Grey,
    Khaki,
    Orange,
    Pink,
    Purple,
    Red,
    White,
    Yellow,
}

// ---------------------------------------------------------------------------
// GameObject
// ---------------------------------------------------------------------------

/// A placed (or about-to-be-placed) piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub variant: Variant,
    pub position: Grid3,
    pub rotation: Rotation,
    pub color: Option<PaintColor>,
    pub collision_type: CollisionType,
    pub slot: Slot,
    /// Only set for wall-family pieces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<WallFace>,
}

impl GameObject {
    pub fn frame(id: ObjectId, variant: FrameVariant, position: Grid3, rotation: Rotation) -> Self {
        Self::from_variant(id, Variant::Frame(variant), position, rotation)
    }

    pub fn wall(
        id: ObjectId,
        variant: WallVariant,
        position: Grid3,
        face: WallFace,
        rotation: Rotation,
    ) -> Self {
        let mut obj = Self::from_variant(id, Variant::Wall(variant), position, rotation);
        obj.face = Some(face);
        obj
    }

    pub fn pipe(id: ObjectId, variant: PipeVariant, position: Grid3, rotation: Rotation) -> Self {
        Self::from_variant(id, Variant::Pipe(variant), position, rotation)
    }

    pub fn cable(id: ObjectId, variant: CableVariant, position: Grid3, rotation: Rotation) -> Self {
        Self::from_variant(id, Variant::Cable(variant), position, rotation)
    }

    pub fn chute(id: ObjectId, variant: ChuteVariant, position: Grid3, rotation: Rotation) -> Self {
        Self::from_variant(id, Variant::Chute(variant), position, rotation)
    }

    pub fn device(id: ObjectId, variant: DeviceVariant, position: Grid3, rotation: Rotation) -> Self {
        Self::from_variant(id, Variant::Device(variant), position, rotation)
    }

    /// Build an object with the classification its variant implies. Walls
    /// default to the north face.
    pub fn from_variant(id: ObjectId, variant: Variant, position: Grid3, rotation: Rotation) -> Self {
        let (object_type, collision_type, slot) = classify(&variant);
        let face = (object_type == ObjectType::Wall).then_some(WallFace::North);
        Self {
            id,
            object_type,
            variant,
            position,
            rotation,
            color: None,
            collision_type,
            slot,
            face,
        }
    }

    /// Paint the object. Cables cannot be painted; the call is a no-op.
    pub fn with_color(mut self, color: PaintColor) -> Self {
        if self.object_type != ObjectType::Cable {
            self.color = Some(color);
        }
        self
    }

    /// Move a wall-family piece to another face. No-op for other families.
    pub fn with_face(mut self, face: WallFace) -> Self {
        if self.object_type == ObjectType::Wall {
            self.face = Some(face);
        }
        self
    }

    /// Copy under a fresh id, for duplicate/paste.
    pub fn clone_with_id(&self, id: ObjectId) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn grid_type(&self) -> GridType {
        self.object_type.grid_type()
    }

    pub fn is_pipe(&self) -> bool {
        self.slot.is_pipe()
    }

    pub fn is_cable(&self) -> bool {
        self.slot == Slot::Cable
    }

    pub fn is_chute(&self) -> bool {
        self.slot == Slot::Chute
    }

    pub fn is_exclusive(&self) -> bool {
        self.collision_type == CollisionType::ExclusiveCell
    }

    /// Whether type, slot, collision class, face and color agree with what
    /// the variant implies.
    pub fn is_consistent(&self) -> bool {
        let (object_type, collision_type, slot) = classify(&self.variant);
        self.object_type == object_type
            && self.collision_type == collision_type
            && self.slot == slot
            && self.face.is_some() == (object_type == ObjectType::Wall)
            && !(object_type == ObjectType::Cable && self.color.is_some())
    }
}

fn classify(variant: &Variant) -> (ObjectType, CollisionType, Slot) {
    match variant {
        Variant::Frame(_) => (ObjectType::Frame, CollisionType::SlotSharing, Slot::Structural),
        Variant::Wall(_) => (ObjectType::Wall, CollisionType::FaceBlocking, Slot::Structural),
        Variant::Pipe(p) => (
            ObjectType::Pipe,
            CollisionType::SlotSharing,
            Slot::for_pipe_network(p.network),
        ),
        Variant::Cable(_) => (ObjectType::Cable, CollisionType::SlotSharing, Slot::Cable),
        Variant::Chute(_) => (ObjectType::Chute, CollisionType::SlotSharing, Slot::Chute),
        Variant::Device(_) => (ObjectType::Device, CollisionType::ExclusiveCell, Slot::Device),
    }
}
