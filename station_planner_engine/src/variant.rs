// Closed variant model: every prefab the planner can place.
//
// Each object family gets its own enum, and `Variant` is the sum over them.
// The game identifies pieces by prefab name (`StructurePipeCorner`,
// `StructureCableJunctionH4`, ...); those names are produced by
// `prefab_name()` and parsed back by `Variant::from_prefab()`, which scans the
// enumerated table rather than pulling names apart. Serde uses the prefab
// string, so saved plans and the import boundary carry the game's own names.
//
// ## Shape keys
//
// Pipes and cables also have a *shape*: the connector layout that the
// auto-junction search works with. `shape_key()` is an explicit table from
// variant to `ShapeKey`; length suffixes collapse by construction (a 3, 5 or
// 10 segment straight is `ShapeKey::Straight`). The reverse direction,
// `with_shape()`, re-applies a found shape to an existing variant's family,
// so an insulated liquid pipe stays insulated liquid and a heavy cable stays
// heavy.
//
// Only combinations that exist in the game are enumerated. Heavy and normal
// cable have no multi-segment straights; super heavy cable does.
//
// See also: `object.rs` for the factories that pair a variant with its type,
// slot and collision class, `connection.rs` for the shape → pattern tables.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Shape keys
// ---------------------------------------------------------------------------

/// Canonical connector layout of a pipe, cable or chute piece.
///
/// Pipe shapes and cable shapes are separate keys even where the layouts
/// coincide (a cable `Junction` is a pipe `TJunction`), because the two
/// families carry separate pattern tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKey {
    Straight,
    Corner,
    TJunction,
    Cross3,
    Cross4,
    Cross5,
    Cross6,
    Corner3,
    Corner4,
    Junction,
    Junction4,
    Junction5,
    Junction6,
}

impl ShapeKey {
    pub const ALL: [ShapeKey; 13] = [
        ShapeKey::Straight,
        ShapeKey::Corner,
        ShapeKey::TJunction,
        ShapeKey::Cross3,
        ShapeKey::Cross4,
        ShapeKey::Cross5,
        ShapeKey::Cross6,
        ShapeKey::Corner3,
        ShapeKey::Corner4,
        ShapeKey::Junction,
        ShapeKey::Junction4,
        ShapeKey::Junction5,
        ShapeKey::Junction6,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKey::Straight => "Straight",
            ShapeKey::Corner => "Corner",
            ShapeKey::TJunction => "TJunction",
            ShapeKey::Cross3 => "Cross3",
            ShapeKey::Cross4 => "Cross4",
            ShapeKey::Cross5 => "Cross5",
            ShapeKey::Cross6 => "Cross6",
            ShapeKey::Corner3 => "Corner3",
            ShapeKey::Corner4 => "Corner4",
            ShapeKey::Junction => "Junction",
            ShapeKey::Junction4 => "Junction4",
            ShapeKey::Junction5 => "Junction5",
            ShapeKey::Junction6 => "Junction6",
        }
    }

    /// Look up a normalized key such as `"Cross4"`.
    ///
    /// Multi-segment straights (`"Straight3"`, `"Straight10"`) and the empty
    /// key both resolve to `Straight`. Anything else unknown is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        if key.is_empty() {
            return Some(ShapeKey::Straight);
        }
        if let Some(len) = key.strip_prefix("Straight") {
            return len.chars().all(|c| c.is_ascii_digit()).then_some(ShapeKey::Straight);
        }
        ShapeKey::ALL.into_iter().find(|s| s.as_str() == key)
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Frames and walls
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameVariant {
    Steel,
    SteelCorner,
    SteelSide,
    SteelCornerCut,
    Iron,
}

impl FrameVariant {
    pub const ALL: [FrameVariant; 5] = [
        FrameVariant::Steel,
        FrameVariant::SteelCorner,
        FrameVariant::SteelSide,
        FrameVariant::SteelCornerCut,
        FrameVariant::Iron,
    ];

    pub fn prefab_name(self) -> &'static str {
        match self {
            FrameVariant::Steel => "StructureFrame",
            FrameVariant::SteelCorner => "StructureFrameCorner",
            FrameVariant::SteelSide => "StructureFrameSide",
            FrameVariant::SteelCornerCut => "StructureFrameCornerCut",
            FrameVariant::Iron => "StructureFrameIron",
        }
    }
}

/// Wall-family pieces. Windows, doors and airlocks occupy a face the same
/// way a wall panel does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallVariant {
    Steel,
    SteelCorner,
    Iron,
    Window,
    Door,
    Airlock,
}

impl WallVariant {
    pub const ALL: [WallVariant; 6] = [
        WallVariant::Steel,
        WallVariant::SteelCorner,
        WallVariant::Iron,
        WallVariant::Window,
        WallVariant::Door,
        WallVariant::Airlock,
    ];

    pub fn prefab_name(self) -> &'static str {
        match self {
            WallVariant::Steel => "StructureWall",
            WallVariant::SteelCorner => "StructureWallCorner",
            WallVariant::Iron => "StructureWallIron",
            WallVariant::Window => "StructureWindow",
            WallVariant::Door => "StructureDoor",
            WallVariant::Airlock => "StructureAirlock",
        }
    }
}

// ---------------------------------------------------------------------------
// Pipes
// ---------------------------------------------------------------------------

/// Which fluid network a pipe belongs to. Gas and liquid pipes occupy
/// different slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PipeNetwork {
    Gas,
    Liquid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PipePiece {
    Straight,
    Straight3,
    Straight5,
    Straight10,
    Corner,
    TJunction,
    Cross3,
    Cross4,
    Cross5,
    Cross6,
}

impl PipePiece {
    pub const ALL: [PipePiece; 10] = [
        PipePiece::Straight,
        PipePiece::Straight3,
        PipePiece::Straight5,
        PipePiece::Straight10,
        PipePiece::Corner,
        PipePiece::TJunction,
        PipePiece::Cross3,
        PipePiece::Cross4,
        PipePiece::Cross5,
        PipePiece::Cross6,
    ];

    pub fn shape_key(self) -> ShapeKey {
        match self {
            PipePiece::Straight | PipePiece::Straight3 | PipePiece::Straight5 | PipePiece::Straight10 => {
                ShapeKey::Straight
            }
            PipePiece::Corner => ShapeKey::Corner,
            PipePiece::TJunction => ShapeKey::TJunction,
            PipePiece::Cross3 => ShapeKey::Cross3,
            PipePiece::Cross4 => ShapeKey::Cross4,
            PipePiece::Cross5 => ShapeKey::Cross5,
            PipePiece::Cross6 => ShapeKey::Cross6,
        }
    }

    /// The single-segment piece for a pipe shape. Cable-only shapes have no
    /// pipe piece.
    pub fn from_shape(shape: ShapeKey) -> Option<Self> {
        Some(match shape {
            ShapeKey::Straight => PipePiece::Straight,
            ShapeKey::Corner => PipePiece::Corner,
            ShapeKey::TJunction => PipePiece::TJunction,
            ShapeKey::Cross3 => PipePiece::Cross3,
            ShapeKey::Cross4 => PipePiece::Cross4,
            ShapeKey::Cross5 => PipePiece::Cross5,
            ShapeKey::Cross6 => PipePiece::Cross6,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipeVariant {
    pub network: PipeNetwork,
    pub insulated: bool,
    pub piece: PipePiece,
}

impl PipeVariant {
    pub const fn new(network: PipeNetwork, insulated: bool, piece: PipePiece) -> Self {
        Self {
            network,
            insulated,
            piece,
        }
    }

    pub const fn gas(piece: PipePiece) -> Self {
        Self::new(PipeNetwork::Gas, false, piece)
    }

    pub const fn liquid(piece: PipePiece) -> Self {
        Self::new(PipeNetwork::Liquid, false, piece)
    }

    fn prefix(self) -> &'static str {
        match (self.insulated, self.network) {
            (false, PipeNetwork::Gas) => "StructurePipe",
            (false, PipeNetwork::Liquid) => "StructurePipeLiquid",
            (true, PipeNetwork::Gas) => "StructureInsulatedPipe",
            (true, PipeNetwork::Liquid) => "StructureInsulatedPipeLiquid",
        }
    }

    pub fn prefab_name(self) -> String {
        let suffix = match self.piece {
            PipePiece::Straight => "Straight",
            PipePiece::Straight3 => "Straight3",
            PipePiece::Straight5 => "Straight5",
            PipePiece::Straight10 => "Straight10",
            PipePiece::Corner => "Corner",
            PipePiece::TJunction => "TJunction",
            // Uninsulated 3-way crosses carry no digit in the game's naming.
            PipePiece::Cross3 if self.insulated => "CrossJunction3",
            PipePiece::Cross3 => "CrossJunction",
            PipePiece::Cross4 => "CrossJunction4",
            PipePiece::Cross5 => "CrossJunction5",
            PipePiece::Cross6 => "CrossJunction6",
        };
        format!("{}{}", self.prefix(), suffix)
    }

    fn all() -> impl Iterator<Item = PipeVariant> {
        [PipeNetwork::Gas, PipeNetwork::Liquid].into_iter().flat_map(|network| {
            [false, true].into_iter().flat_map(move |insulated| {
                PipePiece::ALL
                    .into_iter()
                    .map(move |piece| PipeVariant::new(network, insulated, piece))
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Cables
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CableGrade {
    Normal,
    Heavy,
    SuperHeavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CablePiece {
    Straight,
    Straight3,
    Straight5,
    Straight10,
    Corner,
    Corner3,
    Corner4,
    Junction,
    Junction4,
    Junction5,
    Junction6,
}

const STANDARD_CABLE_PIECES: [CablePiece; 8] = [
    CablePiece::Straight,
    CablePiece::Corner,
    CablePiece::Corner3,
    CablePiece::Corner4,
    CablePiece::Junction,
    CablePiece::Junction4,
    CablePiece::Junction5,
    CablePiece::Junction6,
];

const SUPER_HEAVY_CABLE_PIECES: [CablePiece; 11] = [
    CablePiece::Straight,
    CablePiece::Straight3,
    CablePiece::Straight5,
    CablePiece::Straight10,
    CablePiece::Corner,
    CablePiece::Corner3,
    CablePiece::Corner4,
    CablePiece::Junction,
    CablePiece::Junction4,
    CablePiece::Junction5,
    CablePiece::Junction6,
];

impl CableGrade {
    /// Pieces the game offers for this grade.
    pub fn pieces(self) -> &'static [CablePiece] {
        match self {
            CableGrade::Normal | CableGrade::Heavy => &STANDARD_CABLE_PIECES,
            CableGrade::SuperHeavy => &SUPER_HEAVY_CABLE_PIECES,
        }
    }
}

impl CablePiece {
    pub fn shape_key(self) -> ShapeKey {
        match self {
            CablePiece::Straight | CablePiece::Straight3 | CablePiece::Straight5 | CablePiece::Straight10 => {
                ShapeKey::Straight
            }
            CablePiece::Corner => ShapeKey::Corner,
            CablePiece::Corner3 => ShapeKey::Corner3,
            CablePiece::Corner4 => ShapeKey::Corner4,
            CablePiece::Junction => ShapeKey::Junction,
            CablePiece::Junction4 => ShapeKey::Junction4,
            CablePiece::Junction5 => ShapeKey::Junction5,
            CablePiece::Junction6 => ShapeKey::Junction6,
        }
    }

    pub fn from_shape(shape: ShapeKey) -> Option<Self> {
        Some(match shape {
            ShapeKey::Straight => CablePiece::Straight,
            ShapeKey::Corner => CablePiece::Corner,
            ShapeKey::Corner3 => CablePiece::Corner3,
            ShapeKey::Corner4 => CablePiece::Corner4,
            ShapeKey::Junction => CablePiece::Junction,
            ShapeKey::Junction4 => CablePiece::Junction4,
            ShapeKey::Junction5 => CablePiece::Junction5,
            ShapeKey::Junction6 => CablePiece::Junction6,
            _ => return None,
        })
    }

    /// (stem, length/arity digits). Heavy cable inserts `H` between them.
    fn name_parts(self) -> (&'static str, &'static str) {
        match self {
            CablePiece::Straight => ("Straight", ""),
            CablePiece::Straight3 => ("Straight", "3"),
            CablePiece::Straight5 => ("Straight", "5"),
            CablePiece::Straight10 => ("Straight", "10"),
            CablePiece::Corner => ("Corner", ""),
            CablePiece::Corner3 => ("Corner", "3"),
            CablePiece::Corner4 => ("Corner", "4"),
            CablePiece::Junction => ("Junction", ""),
            CablePiece::Junction4 => ("Junction", "4"),
            CablePiece::Junction5 => ("Junction", "5"),
            CablePiece::Junction6 => ("Junction", "6"),
        }
    }
}

/// A cable piece of a given grade. Fields are private so only pieces the
/// grade actually offers can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CableVariant {
    grade: CableGrade,
    piece: CablePiece,
}

impl CableVariant {
    /// `None` if the grade has no such piece (e.g. a heavy `Straight5`).
    pub fn new(grade: CableGrade, piece: CablePiece) -> Option<Self> {
        grade.pieces().contains(&piece).then_some(Self { grade, piece })
    }

    /// Normal-grade shorthand for `new`. `None` for the long straights,
    /// which only super-heavy cable offers.
    pub fn normal(piece: CablePiece) -> Option<Self> {
        Self::new(CableGrade::Normal, piece)
    }

    pub fn grade(self) -> CableGrade {
        self.grade
    }

    pub fn piece(self) -> CablePiece {
        self.piece
    }

    pub fn prefab_name(self) -> String {
        let (stem, digits) = self.piece.name_parts();
        match self.grade {
            CableGrade::Normal => format!("StructureCable{stem}{digits}"),
            CableGrade::Heavy => format!("StructureCable{stem}H{digits}"),
            CableGrade::SuperHeavy => format!("StructureCableSuperHeavy{stem}{digits}"),
        }
    }

    fn all() -> impl Iterator<Item = CableVariant> {
        [CableGrade::Normal, CableGrade::Heavy, CableGrade::SuperHeavy]
            .into_iter()
            .flat_map(|grade| {
                grade
                    .pieces()
                    .iter()
                    .map(move |&piece| CableVariant { grade, piece })
            })
    }
}

// ---------------------------------------------------------------------------
// Chutes and devices
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChuteVariant {
    Straight,
    Straight3,
    Straight5,
    Straight10,
    Corner,
    Junction,
    FlipFlopSplitter,
    Outlet,
    Inlet,
    Bin,
    ExportBin,
    Valve,
    Overflow,
    Window,
}

impl ChuteVariant {
    pub const ALL: [ChuteVariant; 14] = [
        ChuteVariant::Straight,
        ChuteVariant::Straight3,
        ChuteVariant::Straight5,
        ChuteVariant::Straight10,
        ChuteVariant::Corner,
        ChuteVariant::Junction,
        ChuteVariant::FlipFlopSplitter,
        ChuteVariant::Outlet,
        ChuteVariant::Inlet,
        ChuteVariant::Bin,
        ChuteVariant::ExportBin,
        ChuteVariant::Valve,
        ChuteVariant::Overflow,
        ChuteVariant::Window,
    ];

    pub fn prefab_name(self) -> &'static str {
        match self {
            ChuteVariant::Straight => "StructureChuteStraight",
            ChuteVariant::Straight3 => "StructureChuteStraight3",
            ChuteVariant::Straight5 => "StructureChuteStraight5",
            ChuteVariant::Straight10 => "StructureChuteStraight10",
            ChuteVariant::Corner => "StructureChuteCorner",
            ChuteVariant::Junction => "StructureChuteJunction",
            ChuteVariant::FlipFlopSplitter => "StructureChuteFlipFlopSplitter",
            ChuteVariant::Outlet => "StructureChuteOutlet",
            ChuteVariant::Inlet => "StructureChuteInlet",
            ChuteVariant::Bin => "StructureChuteBin",
            ChuteVariant::ExportBin => "StructureChuteExportBin",
            ChuteVariant::Valve => "StructureChuteValve",
            ChuteVariant::Overflow => "StructureChuteOverflow",
            ChuteVariant::Window => "StructureChuteWindow",
        }
    }

    /// Chute run pieces have a shape; machines on the chute line do not.
    pub fn shape_key(self) -> Option<ShapeKey> {
        match self {
            ChuteVariant::Straight
            | ChuteVariant::Straight3
            | ChuteVariant::Straight5
            | ChuteVariant::Straight10 => Some(ShapeKey::Straight),
            ChuteVariant::Corner => Some(ShapeKey::Corner),
            ChuteVariant::Junction => Some(ShapeKey::Junction),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceVariant {
    SolarPanel,
    SolarPanelHeavy,
    BatterySmall,
    BatteryLarge,
    PipeAnalyzer,
    ActiveVent,
}

impl DeviceVariant {
    pub const ALL: [DeviceVariant; 6] = [
        DeviceVariant::SolarPanel,
        DeviceVariant::SolarPanelHeavy,
        DeviceVariant::BatterySmall,
        DeviceVariant::BatteryLarge,
        DeviceVariant::PipeAnalyzer,
        DeviceVariant::ActiveVent,
    ];

    pub fn prefab_name(self) -> &'static str {
        match self {
            DeviceVariant::SolarPanel => "SolarPanel",
            DeviceVariant::SolarPanelHeavy => "SolarPanelHeavy",
            DeviceVariant::BatterySmall => "BatterySmall",
            DeviceVariant::BatteryLarge => "BatteryLarge",
            DeviceVariant::PipeAnalyzer => "PipeAnalyzer",
            DeviceVariant::ActiveVent => "ActiveVent",
        }
    }
}

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Exact prefab of a placed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Frame(FrameVariant),
    Wall(WallVariant),
    Pipe(PipeVariant),
    Cable(CableVariant),
    Chute(ChuteVariant),
    Device(DeviceVariant),
}

impl Variant {
    pub fn prefab_name(&self) -> String {
        match *self {
            Variant::Frame(v) => v.prefab_name().to_string(),
            Variant::Wall(v) => v.prefab_name().to_string(),
            Variant::Pipe(v) => v.prefab_name(),
            Variant::Cable(v) => v.prefab_name(),
            Variant::Chute(v) => v.prefab_name().to_string(),
            Variant::Device(v) => v.prefab_name().to_string(),
        }
    }

    /// Every prefab the planner knows, family by family.
    pub fn all() -> impl Iterator<Item = Variant> {
        FrameVariant::ALL
            .into_iter()
            .map(Variant::Frame)
            .chain(WallVariant::ALL.into_iter().map(Variant::Wall))
            .chain(PipeVariant::all().map(Variant::Pipe))
            .chain(CableVariant::all().map(Variant::Cable))
            .chain(ChuteVariant::ALL.into_iter().map(Variant::Chute))
            .chain(DeviceVariant::ALL.into_iter().map(Variant::Device))
    }

    /// Look up a prefab name. Unknown names return `None`.
    pub fn from_prefab(name: &str) -> Option<Variant> {
        Variant::all().find(|v| v.prefab_name() == name)
    }

    /// Canonical connector shape, if the piece has one.
    pub fn shape_key(&self) -> Option<ShapeKey> {
        match *self {
            Variant::Pipe(v) => Some(v.piece.shape_key()),
            Variant::Cable(v) => Some(v.piece.shape_key()),
            Variant::Chute(v) => v.shape_key(),
            Variant::Frame(_) | Variant::Wall(_) | Variant::Device(_) => None,
        }
    }

    /// The same family (network, insulation, grade) reshaped to `shape`.
    /// `None` if the family has no piece of that shape.
    pub fn with_shape(&self, shape: ShapeKey) -> Option<Variant> {
        match *self {
            Variant::Pipe(v) => PipePiece::from_shape(shape).map(|piece| Variant::Pipe(PipeVariant { piece, ..v })),
            Variant::Cable(v) => CablePiece::from_shape(shape)
                .and_then(|piece| CableVariant::new(v.grade, piece))
                .map(Variant::Cable),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefab_name())
    }
}

impl From<PipeVariant> for Variant {
    fn from(v: PipeVariant) -> Self {
        Variant::Pipe(v)
    }
}

impl From<CableVariant> for Variant {
    fn from(v: CableVariant) -> Self {
        Variant::Cable(v)
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.prefab_name())
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Variant::from_prefab(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown prefab {name:?}")))
    }
}
