//! Fine-tuning offsets for arrows.
//!
//! Offsets are authored in reference-canvas pixels for an arrow in the north-east
//! quadrant. A lookup walks progressively coarser keys and the first hit wins; a
//! complete miss is a zero offset, never an error.

use std::{collections::HashMap, io::Read, path::Path};

use anyhow::Context;

use crate::{
    foundation::{
        core::{Vec2, rotate_quarters},
        error::{KineticError, KineticResult},
    },
    model::{
        motion::{GridMode, Location, MotionData, MotionType, Turns},
        pictograph::Letter,
    },
};

/// Which lookup key produced an adjustment.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentTier {
    /// Letter, motion type and turns all matched.
    Exact,
    /// Letter and motion type matched, any turns.
    LetterAnyTurns,
    /// Motion type and turns matched, any letter.
    TypeAndTurns,
    /// Only the motion type matched.
    TypeOnly,
    /// Nothing matched; zero offset.
    Fallback,
}

/// One authored table entry; `letter` and `turns` are wildcards when absent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpecialPlacementEntry {
    /// Grid mode the entry applies to.
    pub grid_mode: GridMode,
    /// Letter the entry applies to, or any letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<Letter>,
    /// Motion type the entry applies to.
    pub motion_type: MotionType,
    /// Turn count the entry applies to, or any turns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<Turns>,
    /// Offset `[dx, dy]` in reference-canvas pixels, north-east frame.
    pub offset: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TableKey {
    grid_mode: GridMode,
    letter: Option<Letter>,
    motion_type: MotionType,
    turns: Option<Turns>,
}

struct Query<'a> {
    grid_mode: GridMode,
    letter: Option<&'a Letter>,
    motion_type: MotionType,
    turns: Turns,
}

type KeyFn = fn(&Query<'_>) -> Option<TableKey>;

fn key(q: &Query<'_>, letter: Option<Letter>, turns: Option<Turns>) -> TableKey {
    TableKey {
        grid_mode: q.grid_mode,
        letter,
        motion_type: q.motion_type,
        turns,
    }
}

fn exact_key(q: &Query<'_>) -> Option<TableKey> {
    q.letter.map(|l| key(q, Some(l.clone()), Some(q.turns)))
}

fn letter_key(q: &Query<'_>) -> Option<TableKey> {
    q.letter.map(|l| key(q, Some(l.clone()), None))
}

fn turns_key(q: &Query<'_>) -> Option<TableKey> {
    Some(key(q, None, Some(q.turns)))
}

fn type_key(q: &Query<'_>) -> Option<TableKey> {
    Some(key(q, None, None))
}

// Coarsest last.
const TIERS: [(AdjustmentTier, KeyFn); 4] = [
    (AdjustmentTier::Exact, exact_key),
    (AdjustmentTier::LetterAnyTurns, letter_key),
    (AdjustmentTier::TypeAndTurns, turns_key),
    (AdjustmentTier::TypeOnly, type_key),
];

/// Offset applied to an arrow, already rotated and scaled for its canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArrowAdjustment {
    /// Lookup tier that produced the offset.
    pub tier: AdjustmentTier,
    /// Scene-space offset.
    pub offset: Vec2,
}

/// Special-placement lookup table.
#[derive(Clone, Debug, Default)]
pub struct SpecialPlacements {
    entries: HashMap<TableKey, Vec2>,
}

impl SpecialPlacements {
    /// A table with no entries; every lookup falls back to zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from entries. Duplicate keys and non-finite offsets are rejected.
    pub fn from_entries(
        entries: impl IntoIterator<Item = SpecialPlacementEntry>,
    ) -> KineticResult<Self> {
        let mut out = HashMap::new();
        for e in entries {
            let [dx, dy] = e.offset;
            if !dx.is_finite() || !dy.is_finite() {
                return Err(KineticError::validation(format!(
                    "special placement offset must be finite (got [{dx}, {dy}])"
                )));
            }
            let key = TableKey {
                grid_mode: e.grid_mode,
                letter: e.letter,
                motion_type: e.motion_type,
                turns: e.turns,
            };
            if out.contains_key(&key) {
                return Err(KineticError::validation(format!(
                    "duplicate special placement for {} {} letter={} turns={}",
                    key.grid_mode,
                    key.motion_type,
                    key.letter.as_ref().map_or("*", Letter::as_str),
                    key.turns.map_or_else(|| "*".to_string(), |t| t.to_string()),
                )));
            }
            out.insert(key, Vec2::new(dx, dy));
        }
        Ok(Self { entries: out })
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(s: &str) -> KineticResult<Self> {
        let entries: Vec<SpecialPlacementEntry> =
            serde_json::from_str(s).map_err(|e| KineticError::serde(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Parse a JSON array of entries from a reader.
    pub fn from_reader(reader: impl Read) -> KineticResult<Self> {
        let entries: Vec<SpecialPlacementEntry> =
            serde_json::from_reader(reader).map_err(|e| KineticError::serde(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Load a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> KineticResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open special placements '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw authored offset for a motion, with the tier that matched.
    pub fn lookup(
        &self,
        grid_mode: GridMode,
        letter: Option<&Letter>,
        motion_type: MotionType,
        turns: Turns,
    ) -> (AdjustmentTier, Vec2) {
        let query = Query {
            grid_mode,
            letter,
            motion_type,
            turns,
        };
        TIERS
            .iter()
            .find_map(|(tier, key_fn)| {
                let key = key_fn(&query)?;
                self.entries.get(&key).map(|v| (*tier, *v))
            })
            .unwrap_or((AdjustmentTier::Fallback, Vec2::ZERO))
    }

    /// Offset for an arrow at `location`, rotated into its quadrant and scaled by `scale`.
    pub fn adjustment_for(
        &self,
        grid_mode: GridMode,
        letter: Option<&Letter>,
        motion: &MotionData,
        location: Location,
        scale: f64,
    ) -> ArrowAdjustment {
        let (tier, raw) = self.lookup(grid_mode, letter, motion.motion_type, motion.turns);
        if tier == AdjustmentTier::Fallback {
            tracing::trace!(%grid_mode, motion_type = %motion.motion_type, "no special placement");
        }
        ArrowAdjustment {
            tier,
            offset: rotate_quarters(raw, quadrant(location)) * scale,
        }
    }
}

/// Quarter turns from the north-east frame to the quadrant holding `location`.
pub fn quadrant(location: Location) -> u8 {
    location.index() / 2
}

#[cfg(test)]
#[path = "../../tests/unit/arrow/adjustment.rs"]
mod tests;
