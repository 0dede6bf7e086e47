use std::collections::BTreeMap;

use crate::{
    foundation::error::{KineticError, KineticResult},
    model::{
        motion::{Color, MotionData, RotationDirection},
        pictograph::{ColorPair, PictographData},
        position::GridPosition,
    },
};

/// A pictograph placed in a sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BeatData {
    /// 1-based beat number; 0 is the start-position pseudo-beat.
    pub beat_number: u32,
    /// Beat length in counts.
    pub duration: f64,
    /// Blue prop changed spin direction on this beat.
    pub blue_reversal: bool,
    /// Red prop changed spin direction on this beat.
    pub red_reversal: bool,
    /// Pictograph drawn for this beat.
    pub pictograph: PictographData,
}

impl BeatData {
    /// Reversal flag for `color`.
    pub fn reversal(&self, color: Color) -> bool {
        match color {
            Color::Blue => self.blue_reversal,
            Color::Red => self.red_reversal,
        }
    }
}

/// Construction state of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    /// No start position chosen.
    Empty,
    /// A start position is set; beats may follow.
    Building,
}

/// An ordered choreography: start position followed by contiguous beats.
///
/// Every edit returns a new sequence; the receiver is left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceData {
    /// Beat 0.
    pub start_position: Option<BeatData>,
    /// Beats numbered from 1.
    pub beats: Vec<BeatData>,
    /// Free-form metadata (author, level, prop type, ...). `word` is reserved.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl SequenceData {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current construction state.
    pub fn state(&self) -> SequenceState {
        if self.start_position.is_some() {
            SequenceState::Building
        } else {
            SequenceState::Empty
        }
    }

    /// Number of beats after the start position.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// `true` when no beats follow the start position.
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Letters of all beats concatenated.
    pub fn word(&self) -> String {
        self.beats
            .iter()
            .filter_map(|b| b.pictograph.letter.as_ref())
            .map(|l| l.as_str())
            .collect()
    }

    /// Position where the next beat has to start.
    pub fn end_position(&self) -> Option<GridPosition> {
        self.last_beat().and_then(|b| b.pictograph.end_position)
    }

    fn last_beat(&self) -> Option<&BeatData> {
        self.beats.last().or(self.start_position.as_ref())
    }

    /// Replace the whole sequence with a fresh start position.
    pub fn with_start_position(&self, pictograph: PictographData) -> KineticResult<Self> {
        if pictograph.is_blank() {
            return Err(KineticError::validation("start position cannot be blank"));
        }
        pictograph.validate()?;
        if pictograph.start_position != pictograph.end_position {
            return Err(KineticError::validation(format!(
                "start position must not move (got {} -> {})",
                display_position(pictograph.start_position),
                display_position(pictograph.end_position),
            )));
        }
        Ok(Self {
            start_position: Some(BeatData {
                beat_number: 0,
                duration: 1.0,
                blue_reversal: false,
                red_reversal: false,
                pictograph,
            }),
            beats: Vec::new(),
            metadata: self.metadata.clone(),
        })
    }

    /// Append a beat that continues from the current end position.
    ///
    /// Start orientations are taken from the previous beat and end orientations
    /// recomputed; reversal flags are detected per colour.
    #[tracing::instrument(skip(self, pictograph), fields(letter = ?pictograph.letter))]
    pub fn append_beat(&self, pictograph: PictographData, duration: f64) -> KineticResult<Self> {
        let Some(previous) = self.last_beat() else {
            return Err(KineticError::validation(
                "cannot append a beat before choosing a start position",
            ));
        };
        if !duration.is_finite() || duration <= 0.0 {
            return Err(KineticError::validation("beat duration must be finite and > 0"));
        }
        let Some(motions) = pictograph.motions else {
            return Err(KineticError::validation("cannot append a blank beat"));
        };
        pictograph.validate()?;
        if pictograph.start_position != self.end_position() {
            return Err(KineticError::validation(format!(
                "beat starts at {} but the sequence ends at {}",
                display_position(pictograph.start_position),
                display_position(self.end_position()),
            )));
        }

        let prev_motions = previous
            .pictograph
            .motions
            .ok_or_else(|| KineticError::validation("previous beat is blank"))?;
        let propagated = motions.map(|color, m| m.with_start_ori(prev_motions.get(color).end_ori));
        let reversals = propagated.map(|color, m| self.is_reversal(color, &m));

        let mut next = self.clone();
        next.beats.push(BeatData {
            beat_number: self.beats.len() as u32 + 1,
            duration,
            blue_reversal: reversals.blue,
            red_reversal: reversals.red,
            pictograph: PictographData {
                motions: Some(propagated),
                ..pictograph
            },
        });
        Ok(next)
    }

    fn is_reversal(&self, color: Color, motion: &MotionData) -> bool {
        if motion.prop_rot_dir == RotationDirection::NoRotation {
            return false;
        }
        let last_dir = self
            .beats
            .iter()
            .rev()
            .filter_map(|b| b.pictograph.motion(color))
            .map(|m| m.prop_rot_dir)
            .find(|d| *d != RotationDirection::NoRotation);
        matches!(last_dir, Some(d) if d != motion.prop_rot_dir)
    }

    /// Delete beat `beat_number` and every beat after it.
    ///
    /// Deleting beat 0 removes the start position and returns an empty sequence.
    pub fn delete_beat(&self, beat_number: u32) -> KineticResult<Self> {
        if beat_number == 0 {
            return Ok(self.clear());
        }
        if beat_number as usize > self.beats.len() {
            return Err(KineticError::validation(format!(
                "beat {beat_number} does not exist (sequence has {} beats)",
                self.beats.len()
            )));
        }
        let mut next = self.clone();
        next.beats.truncate(beat_number as usize - 1);
        Ok(next)
    }

    /// Remove the start position and all beats, keeping metadata.
    pub fn clear(&self) -> Self {
        Self {
            start_position: None,
            beats: Vec::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Copy with every pictograph passed through `f`.
    pub fn map_pictographs(&self, f: impl Fn(&PictographData) -> PictographData) -> Self {
        let map_beat = |b: &BeatData| BeatData {
            pictograph: f(&b.pictograph),
            ..b.clone()
        };
        Self {
            start_position: self.start_position.as_ref().map(map_beat),
            beats: self.beats.iter().map(map_beat).collect(),
            metadata: self.metadata.clone(),
        }
    }

    /// Left-right reflection of every beat.
    pub fn mirrored(&self) -> Self {
        self.map_pictographs(PictographData::mirrored)
    }

    /// Rotate every beat clockwise by `eighths * 45` degrees.
    pub fn rotated(&self, eighths: u8) -> Self {
        self.map_pictographs(|p| p.rotated(eighths))
    }

    /// Exchange blue and red in every beat.
    pub fn color_swapped(&self) -> Self {
        let swapped = self.map_pictographs(PictographData::color_swapped);
        Self {
            beats: swapped
                .beats
                .into_iter()
                .map(|b| BeatData {
                    blue_reversal: b.red_reversal,
                    red_reversal: b.blue_reversal,
                    ..b
                })
                .collect(),
            ..swapped
        }
    }

    /// Validate numbering and continuity (used after loading persisted data).
    pub fn validate(&self) -> KineticResult<()> {
        let Some(start) = &self.start_position else {
            if !self.beats.is_empty() {
                return Err(KineticError::validation(
                    "sequence has beats but no start position",
                ));
            }
            return Ok(());
        };
        if start.beat_number != 0 {
            return Err(KineticError::validation("start position must be beat 0"));
        }
        start.pictograph.validate()?;

        let mut previous = start;
        for (idx, beat) in self.beats.iter().enumerate() {
            let expected = idx as u32 + 1;
            if beat.beat_number != expected {
                return Err(KineticError::validation(format!(
                    "beat numbers must be contiguous (expected {expected}, got {})",
                    beat.beat_number
                )));
            }
            beat.pictograph.validate()?;
            if beat.pictograph.start_position != previous.pictograph.end_position {
                return Err(KineticError::validation(format!(
                    "beat {expected} starts at {} but beat {} ends at {}",
                    display_position(beat.pictograph.start_position),
                    previous.beat_number,
                    display_position(previous.pictograph.end_position),
                )));
            }
            previous = beat;
        }
        Ok(())
    }

    /// Motions of every beat in order, start position first.
    pub fn motion_pairs(&self) -> impl Iterator<Item = &ColorPair<MotionData>> {
        self.start_position
            .iter()
            .chain(self.beats.iter())
            .filter_map(|b| b.pictograph.motions.as_ref())
    }
}

fn display_position(p: Option<GridPosition>) -> String {
    p.map(|p| p.to_string()).unwrap_or_else(|| "<none>".to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/model/sequence.rs"]
mod tests;
