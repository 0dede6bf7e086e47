use std::{collections::BTreeMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    arrow::placement::ArrowData,
    foundation::error::{KineticError, KineticResult, PlacementError},
    model::{
        motion::{Color, GridMode},
        pictograph::PictographData,
        sequence::SequenceData,
    },
    pipeline::context::PlacementContext,
    prop::placement::PropData,
};

/// Arrows and props for one pictograph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PictographPlacement {
    pub grid_mode: GridMode,
    pub arrows: BTreeMap<Color, ArrowData>,
    pub props: BTreeMap<Color, PropData>,
}

/// What to draw for a pictograph: a placement or an explicit placeholder.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PictographRender {
    Placed(Arc<PictographPlacement>),
    Placeholder { reason: PlacementError },
}

impl PictographRender {
    pub fn placement(&self) -> Option<&PictographPlacement> {
        match self {
            PictographRender::Placed(p) => Some(p),
            PictographRender::Placeholder { .. } => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PictographRender::Placeholder { .. })
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct BeatPlacement {
    /// 0 for the start position.
    pub beat: u32,
    pub render: PictographRender,
}

/// `threads: None` lets rayon pick the worker count.
#[derive(Clone, Debug, Default)]
pub struct BatchThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub pictographs_total: u64,
    pub pictographs_placed: u64,
    pub placeholders: u64,
}

/// Place the start position and every beat of `sequence`, in beat order.
///
/// Pictographs that cannot be placed become placeholders; only a bad threading
/// setup fails the batch.
#[tracing::instrument(skip(ctx, sequence, threading), fields(beats = sequence.len()))]
pub fn place_sequence(
    ctx: &PlacementContext,
    sequence: &SequenceData,
    threading: &BatchThreading,
) -> KineticResult<(Vec<BeatPlacement>, PlacementStats)> {
    let jobs: Vec<(u32, &PictographData)> = sequence
        .start_position
        .iter()
        .chain(sequence.beats.iter())
        .map(|beat| (beat.beat_number, &beat.pictograph))
        .collect();

    let place = |(beat, pictograph): &(u32, &PictographData)| BeatPlacement {
        beat: *beat,
        render: ctx.place_or_placeholder(pictograph),
    };

    let out: Vec<BeatPlacement> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| jobs.par_iter().map(place).collect())
    } else {
        jobs.iter().map(place).collect()
    };

    let mut stats = PlacementStats::default();
    for b in &out {
        stats.pictographs_total += 1;
        if b.render.is_placeholder() {
            stats.placeholders += 1;
        } else {
            stats.pictographs_placed += 1;
        }
    }
    tracing::debug!(?stats, "sequence placed");
    Ok((out, stats))
}

/// Place independent pictographs, keeping input order.
pub fn place_all(
    ctx: &PlacementContext,
    pictographs: &[PictographData],
    threading: &BatchThreading,
) -> KineticResult<Vec<PictographRender>> {
    if !threading.parallel {
        return Ok(pictographs
            .iter()
            .map(|p| ctx.place_or_placeholder(p))
            .collect());
    }
    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| {
        pictographs
            .par_iter()
            .map(|p| ctx.place_or_placeholder(p))
            .collect()
    }))
}

fn build_thread_pool(threads: Option<usize>) -> KineticResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(KineticError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| KineticError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
