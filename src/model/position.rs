use std::{fmt, str::FromStr};

use crate::{
    foundation::error::{KineticError, KineticResult},
    model::motion::{GridMode, Location},
};

/// Family of a named grid position.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PositionGroup {
    /// Hands on opposite locations.
    Alpha,
    /// Hands on the same location.
    Beta,
    /// Hands a quarter apart.
    Gamma,
}

impl PositionGroup {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            PositionGroup::Alpha => "alpha",
            PositionGroup::Beta => "beta",
            PositionGroup::Gamma => "gamma",
        }
    }

    fn table(self) -> &'static [(Location, Location)] {
        match self {
            PositionGroup::Alpha => &ALPHA,
            PositionGroup::Beta => &BETA,
            PositionGroup::Gamma => &GAMMA,
        }
    }
}

use Location::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

// (blue, red) hand locations, indexed by position number - 1.
const ALPHA: [(Location, Location); 8] = [
    (S, N),
    (SW, NE),
    (W, E),
    (NW, SE),
    (N, S),
    (NE, SW),
    (E, W),
    (SE, NW),
];

const BETA: [(Location, Location); 8] = [
    (N, N),
    (NE, NE),
    (E, E),
    (SE, SE),
    (S, S),
    (SW, SW),
    (W, W),
    (NW, NW),
];

const GAMMA: [(Location, Location); 16] = [
    (W, N),
    (NW, NE),
    (N, E),
    (NE, SE),
    (E, S),
    (SE, SW),
    (S, W),
    (SW, NW),
    (E, N),
    (SE, NE),
    (S, E),
    (SW, SE),
    (W, S),
    (NW, SW),
    (N, W),
    (NE, NW),
];

/// A named grid position such as `alpha1` or `gamma11`.
///
/// Each position fixes where both hands are.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct GridPosition {
    group: PositionGroup,
    number: u8,
}

impl GridPosition {
    /// Build a position; `number` is 1-based and bounded by the group size.
    pub fn new(group: PositionGroup, number: u8) -> KineticResult<Self> {
        let max = group.table().len();
        if number == 0 || usize::from(number) > max {
            return Err(KineticError::validation(format!(
                "{} position number must be in 1..={max} (got {number})",
                group.as_str()
            )));
        }
        Ok(Self { group, number })
    }

    /// Position family.
    pub fn group(self) -> PositionGroup {
        self.group
    }

    /// 1-based position number.
    pub fn number(self) -> u8 {
        self.number
    }

    /// `(blue, red)` hand locations.
    pub fn locations(self) -> (Location, Location) {
        self.group.table()[usize::from(self.number - 1)]
    }

    /// Grid mode whose hand points this position uses.
    pub fn grid_mode(self) -> GridMode {
        if self.locations().0.is_cardinal() {
            GridMode::Diamond
        } else {
            GridMode::Box
        }
    }

    /// Reverse lookup from hand locations. Hands 45 degrees apart have no position.
    pub fn from_locations(blue: Location, red: Location) -> Option<Self> {
        [PositionGroup::Alpha, PositionGroup::Beta, PositionGroup::Gamma]
            .into_iter()
            .find_map(|group| {
                group
                    .table()
                    .iter()
                    .position(|&pair| pair == (blue, red))
                    .map(|idx| Self {
                        group,
                        number: idx as u8 + 1,
                    })
            })
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.group.as_str(), self.number)
    }
}

impl FromStr for GridPosition {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| KineticError::validation(format!("position '{s}' has no number")))?;
        let (name, digits) = s.split_at(split);
        let group = match name {
            "alpha" => PositionGroup::Alpha,
            "beta" => PositionGroup::Beta,
            "gamma" => PositionGroup::Gamma,
            _ => {
                return Err(KineticError::validation(format!(
                    "unknown position family '{name}'"
                )));
            }
        };
        let number = digits
            .parse::<u8>()
            .map_err(|_| KineticError::validation(format!("bad position number in '{s}'")))?;
        Self::new(group, number)
    }
}

impl TryFrom<String> for GridPosition {
    type Error = KineticError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridPosition> for String {
    fn from(value: GridPosition) -> Self {
        value.to_string()
    }
}

/// A `<start>_<end>` pair of grid positions, e.g. `alpha1_alpha3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    /// Position at the start of the beat.
    pub start: GridPosition,
    /// Position at the end of the beat.
    pub end: GridPosition,
}

impl PositionKey {
    /// `true` when start and end coincide (a start position).
    pub fn is_stationary(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.start, self.end)
    }
}

impl FromStr for PositionKey {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('_')
            .ok_or_else(|| KineticError::validation(format!("position key '{s}' lacks '_'")))?;
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/position.rs"]
mod tests;
