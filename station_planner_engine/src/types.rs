// Core types shared across the placement engine.
//
// Defines the grid coordinate (`Grid3`), grid granularities, the 90-degree
// `Rotation`, and the `ObjectId` identity type. All types derive `Serialize`
// and `Deserialize` because they cross the serialization boundary as parts of
// plain `GameObject` records.
//
// ## Units
//
// Coordinates are integers in 0.1 m units, the same precision the game uses
// internally. Structural pieces (frames, walls, devices) snap to the 2 m main
// grid (20 units); pipes, cables and chutes snap to the 0.5 m small grid
// (5 units). Nothing in the engine works in floating-point meters except the
// two conversion helpers.
//
// ## Spatial keys
//
// `Grid3` is `Ord` and is used directly as the key of the grid's `BTreeMap`.
// `pack()`/`unpack()` give a collision-free integer key (the three `i32`
// components side by side in a `u128`); `Display`/`FromStr` give the
// reversible `x,y,z` string form used in logs and by external tooling.
//
// See also: `prng.rs` for the generator behind `ObjectId::new`, `object.rs`
// for `GameObject`, `grid.rs` for the spatial index.

use crate::prng::IdRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Grid constants
// ---------------------------------------------------------------------------

/// Meters per grid unit.
pub const GRID_PRECISION: f64 = 0.1;
/// Units per main grid cell (2.0 m).
pub const MAIN_GRID: i32 = 20;
/// Units per small grid cell (0.5 m).
pub const SMALL_GRID: i32 = 5;

/// Placement granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridType {
    /// 2 m cells: frames, walls, devices.
    Main,
    /// 0.5 m cells: pipes, cables, chutes.
    Small,
}

impl GridType {
    /// Cell edge length in grid units.
    pub const fn step(self) -> i32 {
        match self {
            GridType::Main => MAIN_GRID,
            GridType::Small => SMALL_GRID,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid3
// ---------------------------------------------------------------------------

/// A position on the build grid, in 0.1 m units.
///
/// - X: east (positive) / west (negative)
/// - Y: up (positive) / down (negative); a floor level is a fixed Y
/// - Z: north (positive) / south (negative)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grid3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Grid3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert to world meters.
    pub fn to_world_meters(self) -> [f64; 3] {
        [
            f64::from(self.x) * GRID_PRECISION,
            f64::from(self.y) * GRID_PRECISION,
            f64::from(self.z) * GRID_PRECISION,
        ]
    }

    /// Convert world meters to the nearest grid unit on each axis.
    pub fn from_world_meters(x: f64, y: f64, z: f64) -> Self {
        Self::new(meters_to_units(x), meters_to_units(y), meters_to_units(z))
    }

    /// Snap each component to the nearest multiple of the grid's step.
    pub fn snap(self, grid: GridType) -> Self {
        let step = grid.step();
        Self::new(
            snap_component(self.x, step),
            snap_component(self.y, step),
            snap_component(self.z, step),
        )
    }

    pub fn snap_to_main_grid(self) -> Self {
        self.snap(GridType::Main)
    }

    pub fn snap_to_small_grid(self) -> Self {
        self.snap(GridType::Small)
    }

    /// Pack into a single integer key. Bits 64..96 hold x, 32..64 hold y,
    /// 0..32 hold z, each as its raw two's-complement bit pattern.
    pub const fn pack(self) -> u128 {
        ((self.x as u32 as u128) << 64) | ((self.y as u32 as u128) << 32) | (self.z as u32 as u128)
    }

    /// Inverse of `pack`.
    pub const fn unpack(key: u128) -> Self {
        Self::new(
            (key >> 64) as u32 as i32,
            (key >> 32) as u32 as i32,
            key as u32 as i32,
        )
    }
}

fn meters_to_units(meters: f64) -> i32 {
    (meters / GRID_PRECISION).round() as i32
}

/// Nearest multiple of `step`; halves round toward positive infinity.
fn snap_component(value: i32, step: i32) -> i32 {
    // Integer form of `floor(value / step + 0.5) * step`, widened so values
    // near the i32 limits do not overflow mid-computation.
    let (v, s) = (i64::from(value), i64::from(step));
    ((2 * v + s).div_euclid(2 * s) * s) as i32
}

impl fmt::Display for Grid3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Error for a malformed `x,y,z` key.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid grid key {0:?}, expected \"x,y,z\"")]
pub struct ParseGrid3Error(pub String);

impl FromStr for Grid3 {
    type Err = ParseGrid3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGrid3Error(s.to_string());
        let mut parts = s.split(',').map(|p| p.trim().parse::<i32>());
        let x = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let y = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let z = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self::new(x, y, z))
    }
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// Rotation axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Direction of a quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationSense {
    Clockwise,
    CounterClockwise,
}

impl RotationSense {
    const fn degrees(self) -> i32 {
        match self {
            RotationSense::Clockwise => 90,
            RotationSense::CounterClockwise => -90,
        }
    }
}

/// Normalize an angle to one of 0, 90, 180, 270.
///
/// The angle is first wrapped into [0, 360), then rounded to the nearest
/// multiple of 90. An angle that rounds up to 360 wraps to 0.
pub fn normalize_angle(degrees: f64) -> u16 {
    let wrapped = degrees.rem_euclid(360.0);
    let quarters = (wrapped / 90.0).round() as i64;
    (quarters.rem_euclid(4) * 90) as u16
}

/// Euler rotation in degrees, each component one of 0/90/180/270.
///
/// Components are private so an unnormalized rotation cannot be built;
/// deserialization normalizes too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRotation", into = "RawRotation")]
pub struct Rotation {
    x: u16,
    y: u16,
    z: u16,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct RawRotation {
    x: f64,
    y: f64,
    z: f64,
}

impl From<RawRotation> for Rotation {
    fn from(raw: RawRotation) -> Self {
        Rotation::from_degrees(raw.x, raw.y, raw.z)
    }
}

impl From<Rotation> for RawRotation {
    fn from(r: Rotation) -> Self {
        RawRotation {
            x: f64::from(r.x),
            y: f64::from(r.y),
            z: f64::from(r.z),
        }
    }
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Rotation = Rotation { x: 0, y: 0, z: 0 };

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self::from_degrees(f64::from(x), f64::from(y), f64::from(z))
    }

    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: normalize_angle(x),
            y: normalize_angle(y),
            z: normalize_angle(z),
        }
    }

    /// Pure yaw (rotation about Y).
    pub fn yaw(degrees: i32) -> Self {
        Self::new(0, degrees, 0)
    }

    pub fn x(self) -> u16 {
        self.x
    }

    pub fn y(self) -> u16 {
        self.y
    }

    pub fn z(self) -> u16 {
        self.z
    }

    pub fn get(self, axis: Axis) -> u16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Quarter turns about Y, in 0..4.
    pub fn yaw_steps(self) -> u8 {
        (self.y / 90) as u8 % 4
    }

    /// Rotate a quarter turn about one axis.
    pub fn rotate90(self, axis: Axis, sense: RotationSense) -> Self {
        let turned = i32::from(self.get(axis)) + sense.degrees();
        let mut out = self;
        let value = normalize_angle(f64::from(turned));
        match axis {
            Axis::X => out.x = value,
            Axis::Y => out.y = value,
            Axis::Z => out.z = value,
        }
        out
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}°, {}°, {}°)", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Object identity
// ---------------------------------------------------------------------------

/// Identity of a placed object: a UUID v4 drawn from the session's `IdRng`.
///
/// Layout follows RFC 4122: version nibble (byte 6, high half) is `0100`,
/// variant bits (byte 8, top two) are `10`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 16]);

impl ObjectId {
    pub fn new(rng: &mut IdRng) -> Self {
        let mut bytes = rng.next_bytes16();
        bytes[6] = (bytes[6] & 0x0F) | 0x40;
        bytes[8] = (bytes[8] & 0x3F) | 0x80;
        Self(bytes)
    }

    /// Parse the 8-4-4-4-12 hex form. Dashes are optional.
    pub fn parse(s: &str) -> Option<Self> {
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 || !hex.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

// Serialized as the hex string so ids stay readable in saved plans and can
// be used as JSON map keys.
impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse(&s).ok_or_else(|| serde::de::Error::custom("invalid object id"))
    }
}
