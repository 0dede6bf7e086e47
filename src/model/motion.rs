use std::fmt;

use crate::foundation::error::{KineticError, KineticResult};

/// Colour channel of a motion. Every pictograph carries exactly one motion per colour.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Left-hand prop.
    Blue,
    /// Right-hand prop.
    Red,
}

impl Color {
    /// Both colours in canonical order.
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }

    /// The other colour.
    pub fn other(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }
}

/// Kind of movement a prop performs between its start and end location.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MotionType {
    /// Prop rotates with the handpath.
    Pro,
    /// Prop rotates against the handpath.
    Anti,
    /// Hand stays in place.
    Static,
    /// Hand travels through the center to the opposite location.
    Dash,
    /// Prop keeps its absolute heading while the hand moves.
    Float,
}

impl MotionType {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            MotionType::Pro => "pro",
            MotionType::Anti => "anti",
            MotionType::Static => "static",
            MotionType::Dash => "dash",
            MotionType::Float => "float",
        }
    }

    /// Pro, anti and float motions move the hand a quarter around the grid.
    pub fn is_shift(self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }
}

/// Prop spin direction.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RotationDirection {
    /// Clockwise.
    #[serde(rename = "cw")]
    Clockwise,
    /// Counter-clockwise.
    #[serde(rename = "ccw")]
    CounterClockwise,
    /// No spin.
    #[serde(rename = "no_rot")]
    NoRotation,
}

impl RotationDirection {
    /// Canonical short name.
    pub fn as_str(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "cw",
            RotationDirection::CounterClockwise => "ccw",
            RotationDirection::NoRotation => "no_rot",
        }
    }

    /// Mirror image of this direction.
    pub fn flipped(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
            RotationDirection::NoRotation => RotationDirection::NoRotation,
        }
    }
}

/// One of the eight compass points a hand, prop or arrow can occupy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Location {
    /// North.
    #[serde(rename = "n")]
    North,
    /// North-east.
    #[serde(rename = "ne")]
    NorthEast,
    /// East.
    #[serde(rename = "e")]
    East,
    /// South-east.
    #[serde(rename = "se")]
    SouthEast,
    /// South.
    #[serde(rename = "s")]
    South,
    /// South-west.
    #[serde(rename = "sw")]
    SouthWest,
    /// West.
    #[serde(rename = "w")]
    West,
    /// North-west.
    #[serde(rename = "nw")]
    NorthWest,
}

impl Location {
    /// All locations, clockwise from north.
    pub const ALL: [Location; 8] = [
        Location::North,
        Location::NorthEast,
        Location::East,
        Location::SouthEast,
        Location::South,
        Location::SouthWest,
        Location::West,
        Location::NorthWest,
    ];

    /// Canonical short name.
    pub fn as_str(self) -> &'static str {
        match self {
            Location::North => "n",
            Location::NorthEast => "ne",
            Location::East => "e",
            Location::SouthEast => "se",
            Location::South => "s",
            Location::SouthWest => "sw",
            Location::West => "w",
            Location::NorthWest => "nw",
        }
    }

    /// Index in clockwise order starting at north.
    pub fn index(self) -> u8 {
        match self {
            Location::North => 0,
            Location::NorthEast => 1,
            Location::East => 2,
            Location::SouthEast => 3,
            Location::South => 4,
            Location::SouthWest => 5,
            Location::West => 6,
            Location::NorthWest => 7,
        }
    }

    /// Location at a clockwise index (taken modulo 8).
    pub fn from_index(idx: u8) -> Self {
        Self::ALL[usize::from(idx % 8)]
    }

    /// `true` for n/e/s/w.
    pub fn is_cardinal(self) -> bool {
        self.index() % 2 == 0
    }

    /// Screen-space bearing from the grid center in degrees (east = 0, south = 90).
    pub fn bearing_degrees(self) -> f64 {
        f64::from((u16::from(self.index()) * 45 + 270) % 360)
    }

    /// Rotate clockwise by `eighths * 45` degrees.
    pub fn rotated(self, eighths: u8) -> Self {
        Self::from_index(self.index().wrapping_add(eighths % 8))
    }

    /// Rotate a quarter turn in the given spin direction (`NoRotation` is identity).
    pub fn quarter_turn(self, dir: RotationDirection) -> Self {
        match dir {
            RotationDirection::Clockwise => self.rotated(2),
            RotationDirection::CounterClockwise => self.rotated(6),
            RotationDirection::NoRotation => self,
        }
    }

    /// Diametrically opposite location.
    pub fn opposite(self) -> Self {
        self.rotated(4)
    }

    /// Reflection across the north-south axis.
    pub fn mirrored(self) -> Self {
        Self::from_index((8 - self.index()) % 8)
    }
}

/// Prop orientation relative to the performer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Prop head points toward the center.
    In,
    /// Prop head points away from the center.
    Out,
    /// Prop lies tangent, head pointing clockwise.
    Clock,
    /// Prop lies tangent, head pointing counter-clockwise.
    Counter,
}

impl Orientation {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::In => "in",
            Orientation::Out => "out",
            Orientation::Clock => "clock",
            Orientation::Counter => "counter",
        }
    }

    /// in <-> out, clock <-> counter.
    pub fn switched(self) -> Self {
        match self {
            Orientation::In => Orientation::Out,
            Orientation::Out => Orientation::In,
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
        }
    }

    /// `true` for in/out.
    pub fn is_radial(self) -> bool {
        matches!(self, Orientation::In | Orientation::Out)
    }

    /// Orientation after a left-right reflection of the grid.
    pub fn mirrored(self) -> Self {
        if self.is_radial() {
            self
        } else {
            self.switched()
        }
    }
}

/// Coordinate layout of a pictograph.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Hand points on n/e/s/w.
    #[default]
    Diamond,
    /// Hand points on ne/se/sw/nw.
    Box,
}

impl GridMode {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            GridMode::Diamond => "diamond",
            GridMode::Box => "box",
        }
    }

    /// The other grid mode (a 45 degree rotation away).
    pub fn toggled(self) -> Self {
        match self {
            GridMode::Diamond => GridMode::Box,
            GridMode::Box => GridMode::Diamond,
        }
    }

    /// `true` if `loc` is one of this mode's hand points.
    pub fn is_hand_point(self, loc: Location) -> bool {
        match self {
            GridMode::Diamond => loc.is_cardinal(),
            GridMode::Box => !loc.is_cardinal(),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Color, MotionType, RotationDirection, Location, Orientation, GridMode);

/// Direction the hand travels between two locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handpath {
    /// Quarter turn clockwise.
    Clockwise,
    /// Quarter turn counter-clockwise.
    CounterClockwise,
    /// Straight through the center.
    Dash,
    /// No travel.
    Static,
}

impl Handpath {
    /// Classify a start/end pair; 45 and 135 degree jumps have no handpath.
    pub fn between(start: Location, end: Location) -> Option<Self> {
        match (end.index() + 8 - start.index()) % 8 {
            0 => Some(Handpath::Static),
            2 => Some(Handpath::Clockwise),
            4 => Some(Handpath::Dash),
            6 => Some(Handpath::CounterClockwise),
            _ => None,
        }
    }
}

/// Number of prop turns, stored in half-turn units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Turns(u32);

impl Turns {
    /// Zero turns.
    pub const ZERO: Turns = Turns(0);

    /// Build from a count of half turns.
    pub fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// Build from a turn count; must be finite, non-negative and a multiple of 0.5.
    pub fn from_f64(turns: f64) -> KineticResult<Self> {
        if !turns.is_finite() || turns < 0.0 {
            return Err(KineticError::validation(format!(
                "turns must be finite and >= 0 (got {turns})"
            )));
        }
        let halves = turns * 2.0;
        if halves.fract() != 0.0 || halves > f64::from(u32::MAX) {
            return Err(KineticError::validation(format!(
                "turns must be a multiple of 0.5 (got {turns})"
            )));
        }
        Ok(Self(halves as u32))
    }

    /// Turn count as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) * 0.5
    }

    /// Count of half turns.
    pub fn halves(self) -> u32 {
        self.0
    }

    /// `true` when no turns are taken.
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `true` for 0, 1, 2, ...
    pub fn is_whole(self) -> bool {
        self.0 % 2 == 0
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

impl serde::Serialize for Turns {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> serde::Deserialize<'de> for Turns {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = f64::deserialize(deserializer)?;
        Turns::from_f64(v).map_err(serde::de::Error::custom)
    }
}

/// A single prop's movement within one beat.
///
/// Motions are plain values: edits produce a new `MotionData` through the `with_*`
/// helpers instead of mutating in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MotionData {
    /// Motion kind.
    pub motion_type: MotionType,
    /// Prop spin direction.
    pub prop_rot_dir: RotationDirection,
    /// Hand location at the start of the beat.
    pub start_loc: Location,
    /// Hand location at the end of the beat.
    pub end_loc: Location,
    /// Prop turns taken during the beat.
    #[serde(default)]
    pub turns: Turns,
    /// Prop orientation at the start of the beat.
    pub start_ori: Orientation,
    /// Prop orientation at the end of the beat.
    pub end_ori: Orientation,
}

impl MotionData {
    /// A zero-turn static motion holding `loc` with orientation `ori`.
    pub fn static_at(loc: Location, ori: Orientation) -> Self {
        Self {
            motion_type: MotionType::Static,
            prop_rot_dir: RotationDirection::NoRotation,
            start_loc: loc,
            end_loc: loc,
            turns: Turns::ZERO,
            start_ori: ori,
            end_ori: ori,
        }
    }

    /// Build a motion and derive its end orientation from the start orientation.
    pub fn resolved(
        motion_type: MotionType,
        prop_rot_dir: RotationDirection,
        start_loc: Location,
        end_loc: Location,
        turns: Turns,
        start_ori: Orientation,
    ) -> KineticResult<Self> {
        let motion = Self {
            motion_type,
            prop_rot_dir,
            start_loc,
            end_loc,
            turns,
            start_ori,
            end_ori: start_ori,
        };
        motion.validate()?;
        Ok(motion.with_resolved_end_ori())
    }

    /// Validate structural motion invariants.
    pub fn validate(&self) -> KineticResult<()> {
        match self.motion_type {
            MotionType::Static => {
                if self.start_loc != self.end_loc {
                    return Err(KineticError::validation(format!(
                        "static motion must start and end at the same location ({} -> {})",
                        self.start_loc, self.end_loc
                    )));
                }
            }
            _ => {
                if self.start_loc == self.end_loc {
                    return Err(KineticError::validation(format!(
                        "{} motion must travel (start and end both {})",
                        self.motion_type, self.start_loc
                    )));
                }
            }
        }
        match self.motion_type {
            MotionType::Pro | MotionType::Anti => {
                if self.prop_rot_dir == RotationDirection::NoRotation {
                    return Err(KineticError::validation(format!(
                        "{} motion requires a rotation direction",
                        self.motion_type
                    )));
                }
            }
            MotionType::Float => {
                if !self.turns.is_zero() {
                    return Err(KineticError::validation("float motion cannot take turns"));
                }
            }
            MotionType::Static | MotionType::Dash => {
                if !self.turns.is_zero() && self.prop_rot_dir == RotationDirection::NoRotation {
                    return Err(KineticError::validation(format!(
                        "{} motion with turns requires a rotation direction",
                        self.motion_type
                    )));
                }
            }
        }
        Ok(())
    }

    /// Direction the hand travels.
    pub fn handpath(&self) -> Option<Handpath> {
        Handpath::between(self.start_loc, self.end_loc)
    }

    /// Copy with a different turn count (end orientation is re-derived).
    pub fn with_turns(self, turns: Turns) -> Self {
        Self { turns, ..self }.with_resolved_end_ori()
    }

    /// Copy with a different start orientation (end orientation is re-derived).
    pub fn with_start_ori(self, start_ori: Orientation) -> Self {
        Self { start_ori, ..self }.with_resolved_end_ori()
    }

    /// Copy with an explicit end orientation.
    pub fn with_end_ori(self, end_ori: Orientation) -> Self {
        Self { end_ori, ..self }
    }

    /// Copy with the end orientation recomputed from type, turns and start orientation.
    pub fn with_resolved_end_ori(self) -> Self {
        Self {
            end_ori: crate::model::orientation::end_orientation(&self),
            ..self
        }
    }

    /// Left-right reflection: locations mirror, spin flips, clock/counter swap.
    pub fn mirrored(self) -> Self {
        Self {
            prop_rot_dir: self.prop_rot_dir.flipped(),
            start_loc: self.start_loc.mirrored(),
            end_loc: self.end_loc.mirrored(),
            start_ori: self.start_ori.mirrored(),
            end_ori: self.end_ori.mirrored(),
            ..self
        }
    }

    /// Rotate both locations clockwise by `eighths * 45` degrees.
    pub fn rotated(self, eighths: u8) -> Self {
        Self {
            start_loc: self.start_loc.rotated(eighths),
            end_loc: self.end_loc.rotated(eighths),
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/motion.rs"]
mod tests;
