use std::{collections::BTreeMap, fmt, str::FromStr};

use crate::{
    foundation::error::{KineticError, KineticResult},
    model::{
        motion::{Color, GridMode, MotionData, MotionType},
        position::GridPosition,
    },
};

/// Glyph naming a motion combination (`A`, `W-`, `α`, ...).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(String);

impl Letter {
    /// Build a letter; surrounding whitespace is trimmed and the result must be non-empty.
    pub fn new(s: impl AsRef<str>) -> KineticResult<Self> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(KineticError::validation("letter must be non-empty"));
        }
        Ok(Self(s.to_string()))
    }

    /// Letter text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Letter {
    type Err = KineticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Letter {
    type Error = KineticError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Letter> for String {
    fn from(value: Letter) -> Self {
        value.0
    }
}

/// Letter family, determined by the pair of motion types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterType {
    /// Both hands shift (A-V).
    DualShift,
    /// One hand shifts, the other is static.
    Shift,
    /// One hand shifts, the other dashes.
    CrossShift,
    /// One hand dashes, the other is static.
    Dash,
    /// Both hands dash.
    DualDash,
    /// Both hands are static.
    Static,
}

impl LetterType {
    /// Classify a motion pair.
    pub fn classify(motions: &ColorPair<MotionData>) -> Self {
        enum Kind {
            Shift,
            Dash,
            Static,
        }
        let kind = |m: &MotionData| match m.motion_type {
            MotionType::Pro | MotionType::Anti | MotionType::Float => Kind::Shift,
            MotionType::Dash => Kind::Dash,
            MotionType::Static => Kind::Static,
        };
        match (kind(&motions.blue), kind(&motions.red)) {
            (Kind::Shift, Kind::Shift) => LetterType::DualShift,
            (Kind::Dash, Kind::Dash) => LetterType::DualDash,
            (Kind::Static, Kind::Static) => LetterType::Static,
            (Kind::Shift, Kind::Static) | (Kind::Static, Kind::Shift) => LetterType::Shift,
            (Kind::Shift, Kind::Dash) | (Kind::Dash, Kind::Shift) => LetterType::CrossShift,
            (Kind::Dash, Kind::Static) | (Kind::Static, Kind::Dash) => LetterType::Dash,
        }
    }
}

/// One value per colour channel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ColorPair<T> {
    /// Blue channel.
    pub blue: T,
    /// Red channel.
    pub red: T,
}

impl<T> ColorPair<T> {
    /// Build a pair.
    pub fn new(blue: T, red: T) -> Self {
        Self { blue, red }
    }

    /// Value for `color`.
    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::Blue => &self.blue,
            Color::Red => &self.red,
        }
    }

    /// Copy with the value for `color` replaced.
    pub fn with(self, color: Color, value: T) -> Self {
        match color {
            Color::Blue => Self { blue: value, ..self },
            Color::Red => Self { red: value, ..self },
        }
    }

    /// Iterate in canonical colour order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        [(Color::Blue, &self.blue), (Color::Red, &self.red)].into_iter()
    }

    /// Apply `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(Color, T) -> U) -> ColorPair<U> {
        ColorPair {
            blue: f(Color::Blue, self.blue),
            red: f(Color::Red, self.red),
        }
    }

    /// Exchange blue and red.
    pub fn swapped(self) -> Self {
        Self {
            blue: self.red,
            red: self.blue,
        }
    }
}

/// One pictograph: two simultaneous motions plus the letter they spell.
///
/// A blank pictograph has no motions, no letter and no positions. Pictographs are
/// replaced wholesale on edit; the `with_*` helpers return new values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PictographData {
    /// Grid layout the pictograph is drawn on.
    pub grid_mode: GridMode,
    /// Letter spelled by the motion pair, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<Letter>,
    /// Position derived from the motions' start locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<GridPosition>,
    /// Position derived from the motions' end locations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_position: Option<GridPosition>,
    /// Per-colour motions; `None` for a blank pictograph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motions: Option<ColorPair<MotionData>>,
    /// Free-form metadata carried through persistence.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl PictographData {
    /// An empty pictograph.
    pub fn blank(grid_mode: GridMode) -> Self {
        Self {
            grid_mode,
            letter: None,
            start_position: None,
            end_position: None,
            motions: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Build from a motion pair, deriving start and end positions.
    pub fn from_motions(
        grid_mode: GridMode,
        letter: Option<Letter>,
        motions: ColorPair<MotionData>,
    ) -> KineticResult<Self> {
        let pictograph = Self {
            grid_mode,
            letter,
            start_position: None,
            end_position: None,
            motions: Some(motions),
            metadata: BTreeMap::new(),
        }
        .with_derived_positions();
        pictograph.validate()?;
        Ok(pictograph)
    }

    /// `true` when the pictograph carries no motions.
    pub fn is_blank(&self) -> bool {
        self.motions.is_none()
    }

    /// Motion for `color`, if any.
    pub fn motion(&self, color: Color) -> Option<&MotionData> {
        self.motions.as_ref().map(|m| m.get(color))
    }

    /// Letter family of the motion pair.
    pub fn letter_type(&self) -> Option<LetterType> {
        self.motions.as_ref().map(LetterType::classify)
    }

    /// Validate motion invariants and position consistency.
    pub fn validate(&self) -> KineticResult<()> {
        let Some(motions) = &self.motions else {
            if self.letter.is_some() || self.start_position.is_some() || self.end_position.is_some()
            {
                return Err(KineticError::validation(
                    "blank pictograph cannot carry a letter or positions",
                ));
            }
            return Ok(());
        };

        for (color, motion) in motions.iter() {
            motion
                .validate()
                .map_err(|e| KineticError::validation(format!("{color} motion: {e}")))?;
        }

        let start = GridPosition::from_locations(motions.blue.start_loc, motions.red.start_loc);
        let end = GridPosition::from_locations(motions.blue.end_loc, motions.red.end_loc);
        let (Some(start), Some(end)) = (start, end) else {
            return Err(KineticError::validation(format!(
                "hand locations {}/{} -> {}/{} do not form named positions",
                motions.blue.start_loc,
                motions.red.start_loc,
                motions.blue.end_loc,
                motions.red.end_loc
            )));
        };
        if self.start_position != Some(start) || self.end_position != Some(end) {
            return Err(KineticError::validation(format!(
                "stored positions do not match motions (expected {start}_{end})"
            )));
        }
        Ok(())
    }

    /// Copy with the motion for `color` replaced and positions re-derived.
    pub fn with_motion(&self, color: Color, motion: MotionData) -> KineticResult<Self> {
        let motions = self
            .motions
            .ok_or_else(|| KineticError::validation("cannot set a motion on a blank pictograph"))?;
        let next = Self {
            motions: Some(motions.with(color, motion)),
            ..self.clone()
        }
        .with_derived_positions();
        next.validate()?;
        Ok(next)
    }

    /// Copy with a different letter.
    pub fn with_letter(&self, letter: Option<Letter>) -> Self {
        Self {
            letter,
            ..self.clone()
        }
    }

    /// Copy with one metadata entry set.
    pub fn with_metadata(&self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.insert(key.into(), value);
        Self {
            metadata,
            ..self.clone()
        }
    }

    /// Copy with every motion passed through `f` and positions re-derived.
    pub fn map_motions(&self, f: impl Fn(MotionData) -> MotionData) -> Self {
        Self {
            motions: self.motions.map(|m| m.map(|_, motion| f(motion))),
            ..self.clone()
        }
        .with_derived_positions()
    }

    /// Left-right reflection.
    pub fn mirrored(&self) -> Self {
        self.map_motions(MotionData::mirrored)
    }

    /// Clockwise rotation by `eighths * 45` degrees; odd steps switch grid mode.
    pub fn rotated(&self, eighths: u8) -> Self {
        let mut next = self.map_motions(|m| m.rotated(eighths));
        if eighths % 2 == 1 {
            next.grid_mode = next.grid_mode.toggled();
        }
        next
    }

    /// Blue and red motions exchanged.
    pub fn color_swapped(&self) -> Self {
        Self {
            motions: self.motions.map(ColorPair::swapped),
            ..self.clone()
        }
        .with_derived_positions()
    }

    fn with_derived_positions(self) -> Self {
        let (start_position, end_position) = match &self.motions {
            Some(m) => (
                GridPosition::from_locations(m.blue.start_loc, m.red.start_loc),
                GridPosition::from_locations(m.blue.end_loc, m.red.end_loc),
            ),
            None => (None, None),
        };
        Self {
            start_position,
            end_position,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/pictograph.rs"]
mod tests;
