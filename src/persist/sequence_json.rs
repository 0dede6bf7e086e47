//! Sequence JSON in the array layout used by saved sequences:
//! `[metadata, start_position, beat, beat, ...]`.
//!
//! The metadata entry is an object with `word` and any other free-form keys. The start
//! entry is marked by `sequence_start_position`. Stored positions are checked against
//! the motions on load.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;
use serde_json::Value;

use crate::{
    foundation::error::{KineticError, KineticResult},
    model::{
        motion::{GridMode, MotionData},
        pictograph::{ColorPair, Letter, PictographData},
        position::{GridPosition, PositionGroup},
        sequence::{BeatData, SequenceData},
    },
};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct MetadataEntry {
    #[serde(default)]
    word: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct StartPositionEntry {
    beat: u32,
    sequence_start_position: PositionGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter: Option<Letter>,
    end_pos: GridPosition,
    #[serde(default)]
    grid_mode: GridMode,
    blue_attributes: MotionData,
    red_attributes: MotionData,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct BeatEntry {
    beat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    letter: Option<Letter>,
    start_pos: GridPosition,
    end_pos: GridPosition,
    #[serde(default)]
    grid_mode: GridMode,
    #[serde(default = "default_duration")]
    duration: f64,
    #[serde(default)]
    blue_reversal: bool,
    #[serde(default)]
    red_reversal: bool,
    blue_attributes: MotionData,
    red_attributes: MotionData,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, Value>,
}

fn default_duration() -> f64 {
    1.0
}

/// Key the metadata entry reserves for the computed word.
const WORD_KEY: &str = "word";

/// Serialize to the array layout.
///
/// `word` is written from the beats, so a free metadata key of that name is rejected.
pub fn to_json_value(sequence: &SequenceData) -> KineticResult<Value> {
    if sequence.metadata.contains_key(WORD_KEY) {
        return Err(KineticError::validation(format!(
            "metadata key '{WORD_KEY}' is reserved for the sequence word"
        )));
    }
    let mut out = Vec::with_capacity(sequence.len() + 2);
    out.push(to_value(&MetadataEntry {
        word: sequence.word(),
        extra: sequence.metadata.clone(),
    })?);

    if let Some(start) = &sequence.start_position {
        let p = &start.pictograph;
        let (Some(motions), Some(end_pos)) = (p.motions, p.end_position) else {
            return Err(KineticError::validation("start position is blank"));
        };
        out.push(to_value(&StartPositionEntry {
            beat: 0,
            sequence_start_position: end_pos.group(),
            letter: p.letter.clone(),
            end_pos,
            grid_mode: p.grid_mode,
            blue_attributes: motions.blue,
            red_attributes: motions.red,
            metadata: p.metadata.clone(),
        })?);
    }

    for beat in &sequence.beats {
        let p = &beat.pictograph;
        let (Some(motions), Some(start_pos), Some(end_pos)) =
            (p.motions, p.start_position, p.end_position)
        else {
            return Err(KineticError::validation(format!(
                "beat {} is blank",
                beat.beat_number
            )));
        };
        out.push(to_value(&BeatEntry {
            beat: beat.beat_number,
            letter: p.letter.clone(),
            start_pos,
            end_pos,
            grid_mode: p.grid_mode,
            duration: beat.duration,
            blue_reversal: beat.blue_reversal,
            red_reversal: beat.red_reversal,
            blue_attributes: motions.blue,
            red_attributes: motions.red,
            metadata: p.metadata.clone(),
        })?);
    }
    Ok(Value::Array(out))
}

pub fn to_json_string_pretty(sequence: &SequenceData) -> KineticResult<String> {
    serde_json::to_string_pretty(&to_json_value(sequence)?)
        .map_err(|e| KineticError::serde(e.to_string()))
}

/// Parse the array layout and validate the result.
pub fn from_json_value(value: Value) -> KineticResult<SequenceData> {
    let Value::Array(entries) = value else {
        return Err(KineticError::serde("sequence JSON must be an array"));
    };
    let mut entries = entries.into_iter().peekable();
    let mut sequence = SequenceData::new();

    let has_metadata =
        matches!(entries.peek(), Some(Value::Object(o)) if !o.contains_key("beat"));
    if has_metadata && let Some(first) = entries.next() {
        let meta: MetadataEntry = from_value(first)?;
        sequence.metadata = meta.extra;
    }

    for entry in entries {
        let is_start = entry
            .as_object()
            .is_some_and(|o| o.contains_key("sequence_start_position"));
        if is_start {
            if sequence.start_position.is_some() || !sequence.beats.is_empty() {
                return Err(KineticError::validation(
                    "start position entry must come first and only once",
                ));
            }
            let e: StartPositionEntry = from_value(entry)?;
            let pictograph = checked_pictograph(
                e.grid_mode,
                e.letter,
                ColorPair::new(e.blue_attributes, e.red_attributes),
                Some(e.end_pos),
                e.end_pos,
                e.metadata,
            )?;
            if e.sequence_start_position != e.end_pos.group() {
                return Err(KineticError::validation(format!(
                    "sequence_start_position '{}' does not match {}",
                    e.sequence_start_position.as_str(),
                    e.end_pos
                )));
            }
            sequence.start_position = Some(BeatData {
                beat_number: e.beat,
                duration: 1.0,
                blue_reversal: false,
                red_reversal: false,
                pictograph,
            });
        } else {
            let e: BeatEntry = from_value(entry)?;
            let pictograph = checked_pictograph(
                e.grid_mode,
                e.letter,
                ColorPair::new(e.blue_attributes, e.red_attributes),
                Some(e.start_pos),
                e.end_pos,
                e.metadata,
            )?;
            sequence.beats.push(BeatData {
                beat_number: e.beat,
                duration: e.duration,
                blue_reversal: e.blue_reversal,
                red_reversal: e.red_reversal,
                pictograph,
            });
        }
    }

    sequence.validate()?;
    Ok(sequence)
}

pub fn from_json_str(s: &str) -> KineticResult<SequenceData> {
    let value: Value = serde_json::from_str(s).map_err(|e| KineticError::serde(e.to_string()))?;
    from_json_value(value)
}

pub fn read_sequence_json(path: impl AsRef<Path>) -> KineticResult<SequenceData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read sequence '{}'", path.display()))?;
    from_json_str(&text)
}

fn checked_pictograph(
    grid_mode: GridMode,
    letter: Option<Letter>,
    motions: ColorPair<MotionData>,
    start_pos: Option<GridPosition>,
    end_pos: GridPosition,
    metadata: BTreeMap<String, Value>,
) -> KineticResult<PictographData> {
    let pictograph = PictographData::from_motions(grid_mode, letter, motions)?;
    if pictograph.start_position != start_pos || pictograph.end_position != Some(end_pos) {
        return Err(KineticError::validation(format!(
            "stored positions do not match the motions of letter {}",
            pictograph
                .letter
                .as_ref()
                .map_or("<none>", Letter::as_str)
        )));
    }
    Ok(PictographData {
        metadata,
        ..pictograph
    })
}

fn to_value<T: serde::Serialize>(v: &T) -> KineticResult<Value> {
    serde_json::to_value(v).map_err(|e| KineticError::serde(e.to_string()))
}

fn from_value<T: serde::de::DeserializeOwned>(v: Value) -> KineticResult<T> {
    serde_json::from_value(v).map_err(|e| KineticError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/persist/sequence_json.rs"]
mod tests;
