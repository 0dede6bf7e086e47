use std::collections::BTreeMap;

use crate::{
    arrow::{
        adjustment::{AdjustmentTier, SpecialPlacements},
        location::arrow_location,
        rotation::{arrow_rotation, is_mirrored},
    },
    foundation::{
        core::{Point, Vec2},
        error::PlacementError,
    },
    grid::coords::CoordinateSystem,
    model::{
        motion::{Color, Location, MotionData, MotionType},
        pictograph::PictographData,
    },
};

/// Final placement of one arrow glyph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArrowData {
    /// Colour channel.
    pub color: Color,
    /// Nominal grid location.
    pub location: Location,
    /// Scene coordinate, adjustment included.
    pub coordinate: Point,
    /// Glyph rotation in degrees.
    pub rotation_angle: f64,
    /// Offset applied on top of the location's point.
    pub adjustment: Vec2,
    /// Lookup tier the adjustment came from.
    pub adjustment_tier: AdjustmentTier,
    /// Draw the glyph mirrored.
    pub mirrored: bool,
    /// Zero-turn static motions have no arrow to draw.
    pub visible: bool,
}

/// Places arrows for whole pictographs.
#[derive(Clone, Copy, Debug)]
pub struct ArrowPositioner<'a> {
    coords: &'a CoordinateSystem,
    special: &'a SpecialPlacements,
}

impl<'a> ArrowPositioner<'a> {
    /// Positioner over a coordinate system and a special-placement table.
    pub fn new(coords: &'a CoordinateSystem, special: &'a SpecialPlacements) -> Self {
        Self { coords, special }
    }

    /// Arrow for every colour, or the first failure. Blank pictographs have no arrows.
    pub fn compute_placements(
        &self,
        pictograph: &PictographData,
    ) -> Result<BTreeMap<Color, ArrowData>, PlacementError> {
        let Some(motions) = &pictograph.motions else {
            return Ok(BTreeMap::new());
        };
        motions
            .iter()
            .map(|(color, motion)| {
                self.place_arrow(pictograph, color, motion)
                    .map(|arrow| (color, arrow))
            })
            .collect()
    }

    fn place_arrow(
        &self,
        pictograph: &PictographData,
        color: Color,
        motion: &MotionData,
    ) -> Result<ArrowData, PlacementError> {
        let grid_mode = pictograph.grid_mode;
        let location = arrow_location(color, motion, grid_mode)?;
        let adjustment = self.special.adjustment_for(
            grid_mode,
            pictograph.letter.as_ref(),
            motion,
            location,
            self.coords.scale(),
        );
        Ok(ArrowData {
            color,
            location,
            coordinate: self.coords.location_to_point(location, grid_mode) + adjustment.offset,
            rotation_angle: arrow_rotation(motion, location),
            adjustment: adjustment.offset,
            adjustment_tier: adjustment.tier,
            mirrored: is_mirrored(motion),
            visible: !(motion.motion_type == MotionType::Static && motion.turns.is_zero()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/arrow/placement.rs"]
mod tests;
