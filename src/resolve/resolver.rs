use crate::{
    model::{
        motion::{GridMode, MotionData},
        pictograph::{ColorPair, Letter, PictographData},
        position::PositionKey,
    },
    resolve::dataset::{DatasetRow, MotionSignature, PictographDataset},
};

/// Parse `<start>_<end>`; malformed keys are logged and yield `None`.
pub fn parse_position_key(key: &str) -> Option<PositionKey> {
    match key.parse::<PositionKey>() {
        Ok(k) => Some(k),
        Err(e) => {
            tracing::debug!(key, error = %e, "rejected position key");
            None
        }
    }
}

/// Dataset lookups: start positions, letters and follow-up options.
#[derive(Clone, Copy, Debug)]
pub struct PictographResolver<'a> {
    dataset: &'a PictographDataset,
}

impl<'a> PictographResolver<'a> {
    /// Resolver reading from `dataset`.
    pub fn new(dataset: &'a PictographDataset) -> Self {
        Self { dataset }
    }

    /// First zero-turn dataset pictograph for a stationary key such as `alpha1_alpha1`.
    ///
    /// Stationary rows that carry turns are not start positions and are skipped.
    pub fn start_position(&self, key: &str, grid_mode: GridMode) -> Option<PictographData> {
        let key = parse_position_key(key)?;
        if !key.is_stationary() {
            tracing::debug!(%key, "start position key must not move");
            return None;
        }
        self.rows_for(key, grid_mode)
            .find(|row| row.motions.iter().all(|(_, m)| m.turns.is_zero()))
            .map(|row| row.to_pictograph(grid_mode))
    }

    /// Every dataset pictograph for `key`, in dataset order.
    pub fn pictographs_for(&self, key: &str, grid_mode: GridMode) -> Vec<PictographData> {
        let Some(key) = parse_position_key(key) else {
            return Vec::new();
        };
        self.rows_for(key, grid_mode)
            .map(|row| row.to_pictograph(grid_mode))
            .collect()
    }

    /// Letter spelled by `motions`. Turns and orientations are ignored.
    ///
    /// When several letters share the same motions the first row wins.
    pub fn determine_letter(
        &self,
        motions: &ColorPair<MotionData>,
        grid_mode: GridMode,
    ) -> Option<Letter> {
        let table = self.dataset.table(grid_mode)?;
        let signature = motions.map(|_, m| MotionSignature::from(&m));
        let mut rows = table.rows_matching(&signature);
        let first = rows.next()?;
        let others: Vec<&Letter> = rows
            .map(|r| &r.letter)
            .filter(|l| **l != first.letter)
            .collect();
        if !others.is_empty() {
            tracing::warn!(
                letter = %first.letter,
                alternatives = ?others,
                "ambiguous dataset rows, using the first"
            );
        }
        Some(first.letter.clone())
    }

    /// Pictographs that can follow `previous`, orientations carried over.
    pub fn next_options(
        &self,
        previous: &PictographData,
        grid_mode: GridMode,
    ) -> Vec<PictographData> {
        let (Some(end), Some(prev)) = (previous.end_position, previous.motions) else {
            return Vec::new();
        };
        let Some(table) = self.dataset.table(grid_mode) else {
            return Vec::new();
        };
        table
            .rows_from(end)
            .map(|row| PictographData {
                motions: Some(
                    row.motions
                        .map(|color, m| m.with_start_ori(prev.get(color).end_ori)),
                ),
                ..row.to_pictograph(grid_mode)
            })
            .collect()
    }

    fn rows_for(
        &self,
        key: PositionKey,
        grid_mode: GridMode,
    ) -> impl Iterator<Item = &'a DatasetRow> + 'a {
        self.dataset
            .table(grid_mode)
            .into_iter()
            .flat_map(move |t| t.rows_between(key.start, key.end))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
