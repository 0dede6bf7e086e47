use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    arrow::{adjustment::SpecialPlacements, placement::ArrowPositioner},
    foundation::{
        core::Canvas,
        error::{KineticError, KineticResult, PlacementError},
    },
    grid::coords::{CoordinateSystem, REFERENCE_CANVAS_SIZE},
    model::pictograph::PictographData,
    pipeline::{
        batch::{PictographPlacement, PictographRender},
        cache::PlacementCache,
    },
    prop::placement::PropPositioner,
};

/// Geometry settings for placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Side length of the square canvas in pixels.
    pub canvas_size: u32,
    /// Hand point ring radius as a fraction of the canvas size.
    pub hand_point_ratio: f64,
    /// Distance each overlapping prop moves, as a fraction of the canvas size.
    pub beta_offset_ratio: f64,
    /// Most pictographs the placement cache keeps; `None` leaves it unbounded.
    pub cache_capacity: Option<usize>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            canvas_size: REFERENCE_CANVAS_SIZE as u32,
            hand_point_ratio: 0.151,
            beta_offset_ratio: 25.0 / REFERENCE_CANVAS_SIZE,
            cache_capacity: None,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> KineticResult<()> {
        self.canvas().validate()?;
        if !self.hand_point_ratio.is_finite()
            || self.hand_point_ratio <= 0.0
            || self.hand_point_ratio >= 0.5
        {
            return Err(KineticError::validation(format!(
                "hand_point_ratio must be in (0, 0.5) (got {})",
                self.hand_point_ratio
            )));
        }
        if !self.beta_offset_ratio.is_finite() || self.beta_offset_ratio < 0.0 {
            return Err(KineticError::validation(format!(
                "beta_offset_ratio must be finite and >= 0 (got {})",
                self.beta_offset_ratio
            )));
        }
        if self.cache_capacity == Some(0) {
            return Err(KineticError::validation("cache_capacity must be > 0"));
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::square(self.canvas_size)
    }

    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> KineticResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| KineticError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> KineticResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read placement config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

/// Read-only state shared by every placement call.
///
/// Holds the coordinate system, the special-placement table and a cache of
/// finished placements. It is `Sync`, so one context serves a whole parallel batch.
#[derive(Debug)]
pub struct PlacementContext {
    config: PlacementConfig,
    coords: CoordinateSystem,
    special: Arc<SpecialPlacements>,
    cache: PlacementCache,
}

impl PlacementContext {
    pub fn new(config: PlacementConfig, special: Arc<SpecialPlacements>) -> KineticResult<Self> {
        config.validate()?;
        let coords = CoordinateSystem::new(config.canvas(), config.hand_point_ratio);
        let cache = match config.cache_capacity {
            Some(cap) => PlacementCache::bounded(cap),
            None => PlacementCache::new(),
        };
        Ok(Self {
            config,
            coords,
            special,
            cache,
        })
    }

    /// Default geometry and no special placements.
    pub fn with_defaults() -> KineticResult<Self> {
        Self::new(
            PlacementConfig::default(),
            Arc::new(SpecialPlacements::empty()),
        )
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn coords(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn special_placements(&self) -> &SpecialPlacements {
        &self.special
    }

    pub fn cache(&self) -> &PlacementCache {
        &self.cache
    }

    pub fn arrows(&self) -> ArrowPositioner<'_> {
        ArrowPositioner::new(&self.coords, &self.special)
    }

    pub fn props(&self) -> PropPositioner<'_> {
        PropPositioner::new(
            &self.coords,
            self.config.beta_offset_ratio * self.coords.canvas().size(),
        )
    }

    /// Place arrows and props, bypassing the cache.
    pub fn compute(
        &self,
        pictograph: &PictographData,
    ) -> Result<PictographPlacement, PlacementError> {
        Ok(PictographPlacement {
            grid_mode: pictograph.grid_mode,
            arrows: self.arrows().compute_placements(pictograph)?,
            props: self.props().compute_prop_placements(pictograph),
        })
    }

    /// Cached placement of `pictograph`.
    #[tracing::instrument(skip(self, pictograph), fields(letter = ?pictograph.letter))]
    pub fn place(
        &self,
        pictograph: &PictographData,
    ) -> Result<Arc<PictographPlacement>, PlacementError> {
        self.cache.get_or_place(pictograph, |p| self.compute(p))
    }

    /// Placement, or a placeholder carrying the reason it could not be placed.
    pub fn place_or_placeholder(&self, pictograph: &PictographData) -> PictographRender {
        match self.place(pictograph) {
            Ok(placement) => PictographRender::Placed(placement),
            Err(reason @ PlacementError::LocationResolution { .. }) => {
                tracing::debug!(%reason, "pictograph rendered as placeholder");
                PictographRender::Placeholder { reason }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/context.rs"]
mod tests;
