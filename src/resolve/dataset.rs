//! Tabular pictograph dataset.
//!
//! One CSV table per grid mode; each row is a letter with its two motions. Rows
//! are validated on load, so lookups never see inconsistent positions.

use std::{
    collections::{BTreeMap, HashMap},
    io::Read,
    path::Path,
};

use anyhow::Context;

use crate::{
    foundation::error::{KineticError, KineticResult},
    model::{
        motion::{
            GridMode, Location, MotionData, MotionType, Orientation, RotationDirection, Turns,
        },
        pictograph::{ColorPair, Letter, PictographData},
        position::GridPosition,
    },
};

#[derive(Debug, serde::Deserialize)]
struct CsvRecord {
    letter: String,
    start_pos: GridPosition,
    end_pos: GridPosition,
    blue_motion_type: MotionType,
    blue_prop_rot_dir: RotationDirection,
    blue_start_loc: Location,
    blue_end_loc: Location,
    #[serde(default)]
    blue_start_ori: Option<Orientation>,
    #[serde(default)]
    blue_end_ori: Option<Orientation>,
    #[serde(default)]
    blue_turns: Option<Turns>,
    red_motion_type: MotionType,
    red_prop_rot_dir: RotationDirection,
    red_start_loc: Location,
    red_end_loc: Location,
    #[serde(default)]
    red_start_ori: Option<Orientation>,
    #[serde(default)]
    red_end_ori: Option<Orientation>,
    #[serde(default)]
    red_turns: Option<Turns>,
}

struct MotionColumns {
    motion_type: MotionType,
    prop_rot_dir: RotationDirection,
    start_loc: Location,
    end_loc: Location,
    start_ori: Option<Orientation>,
    end_ori: Option<Orientation>,
    turns: Option<Turns>,
}

impl MotionColumns {
    fn into_motion(self) -> KineticResult<MotionData> {
        let motion = MotionData::resolved(
            self.motion_type,
            self.prop_rot_dir,
            self.start_loc,
            self.end_loc,
            self.turns.unwrap_or_default(),
            self.start_ori.unwrap_or(Orientation::In),
        )?;
        Ok(match self.end_ori {
            Some(ori) => motion.with_end_ori(ori),
            None => motion,
        })
    }
}

impl CsvRecord {
    fn into_row(self) -> KineticResult<DatasetRow> {
        let blue = MotionColumns {
            motion_type: self.blue_motion_type,
            prop_rot_dir: self.blue_prop_rot_dir,
            start_loc: self.blue_start_loc,
            end_loc: self.blue_end_loc,
            start_ori: self.blue_start_ori,
            end_ori: self.blue_end_ori,
            turns: self.blue_turns,
        };
        let red = MotionColumns {
            motion_type: self.red_motion_type,
            prop_rot_dir: self.red_prop_rot_dir,
            start_loc: self.red_start_loc,
            end_loc: self.red_end_loc,
            start_ori: self.red_start_ori,
            end_ori: self.red_end_ori,
            turns: self.red_turns,
        };
        DatasetRow::new(
            Letter::new(&self.letter)?,
            self.start_pos,
            self.end_pos,
            ColorPair::new(blue.into_motion()?, red.into_motion()?),
        )
    }
}

/// Signature used to identify a letter: spin and travel, not turns or orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionSignature {
    pub motion_type: MotionType,
    pub prop_rot_dir: RotationDirection,
    pub start_loc: Location,
    pub end_loc: Location,
}

impl From<&MotionData> for MotionSignature {
    fn from(m: &MotionData) -> Self {
        Self {
            motion_type: m.motion_type,
            prop_rot_dir: m.prop_rot_dir,
            start_loc: m.start_loc,
            end_loc: m.end_loc,
        }
    }
}

/// One dataset row.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetRow {
    pub letter: Letter,
    pub start_pos: GridPosition,
    pub end_pos: GridPosition,
    pub motions: ColorPair<MotionData>,
}

impl DatasetRow {
    /// Build a row; the stated positions must match the motions' hand locations.
    pub fn new(
        letter: Letter,
        start_pos: GridPosition,
        end_pos: GridPosition,
        motions: ColorPair<MotionData>,
    ) -> KineticResult<Self> {
        let derived_start =
            GridPosition::from_locations(motions.blue.start_loc, motions.red.start_loc);
        let derived_end = GridPosition::from_locations(motions.blue.end_loc, motions.red.end_loc);
        if derived_start != Some(start_pos) || derived_end != Some(end_pos) {
            return Err(KineticError::dataset(format!(
                "letter {letter}: positions {start_pos}_{end_pos} do not match hand locations"
            )));
        }
        Ok(Self {
            letter,
            start_pos,
            end_pos,
            motions,
        })
    }

    pub fn signature(&self) -> ColorPair<MotionSignature> {
        ColorPair::new((&self.motions.blue).into(), (&self.motions.red).into())
    }

    pub fn to_pictograph(&self, grid_mode: GridMode) -> PictographData {
        PictographData {
            grid_mode,
            letter: Some(self.letter.clone()),
            start_position: Some(self.start_pos),
            end_position: Some(self.end_pos),
            motions: Some(self.motions),
            metadata: BTreeMap::new(),
        }
    }
}

/// Rows for one grid mode, indexed by position pair and by motion signature.
#[derive(Clone, Debug, Default)]
pub struct DatasetTable {
    rows: Vec<DatasetRow>,
    by_positions: HashMap<(GridPosition, GridPosition), Vec<usize>>,
    by_signature: HashMap<ColorPair<MotionSignature>, Vec<usize>>,
}

impl DatasetTable {
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        let mut by_positions: HashMap<_, Vec<usize>> = HashMap::new();
        let mut by_signature: HashMap<_, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_positions
                .entry((row.start_pos, row.end_pos))
                .or_default()
                .push(idx);
            by_signature.entry(row.signature()).or_default().push(idx);
        }
        Self {
            rows,
            by_positions,
            by_signature,
        }
    }

    /// Parse CSV with a header row. Errors name the 1-based data row.
    pub fn from_csv_reader(reader: impl Read) -> KineticResult<Self> {
        let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows = Vec::new();
        for (idx, record) in csv.deserialize::<CsvRecord>().enumerate() {
            let record =
                record.map_err(|e| KineticError::dataset(format!("row {}: {e}", idx + 1)))?;
            let row = record
                .into_row()
                .map_err(|e| KineticError::dataset(format!("row {}: {e}", idx + 1)))?;
            rows.push(row);
        }
        Ok(Self::from_rows(rows))
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows from `start` to `end`, in file order.
    pub fn rows_between(
        &self,
        start: GridPosition,
        end: GridPosition,
    ) -> impl Iterator<Item = &DatasetRow> {
        self.indexed(self.by_positions.get(&(start, end)))
    }

    /// Rows whose motions share `signature`, in file order.
    pub fn rows_matching(
        &self,
        signature: &ColorPair<MotionSignature>,
    ) -> impl Iterator<Item = &DatasetRow> {
        self.indexed(self.by_signature.get(signature))
    }

    /// Rows starting at `start`, in file order.
    pub fn rows_from(&self, start: GridPosition) -> impl Iterator<Item = &DatasetRow> {
        self.rows.iter().filter(move |r| r.start_pos == start)
    }

    fn indexed<'a>(
        &'a self,
        idx: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a DatasetRow> {
        idx.into_iter().flatten().map(|&i| &self.rows[i])
    }
}

/// Dataset tables keyed by grid mode.
#[derive(Clone, Debug, Default)]
pub struct PictographDataset {
    tables: BTreeMap<GridMode, DatasetTable>,
}

impl PictographDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, grid_mode: GridMode, table: DatasetTable) {
        self.tables.insert(grid_mode, table);
    }

    /// Load a CSV file as the table for `grid_mode`.
    #[tracing::instrument(skip(self, path))]
    pub fn load_csv(&mut self, grid_mode: GridMode, path: impl AsRef<Path>) -> KineticResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open dataset '{}'", path.display()))?;
        let table = DatasetTable::from_csv_reader(std::io::BufReader::new(file))?;
        tracing::debug!(rows = table.len(), %grid_mode, "dataset table loaded");
        self.insert(grid_mode, table);
        Ok(())
    }

    pub fn table(&self, grid_mode: GridMode) -> Option<&DatasetTable> {
        self.tables.get(&grid_mode)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/dataset.rs"]
mod tests;
