use std::collections::BTreeMap;

use crate::{
    foundation::core::{Point, Vec2, normalize_degrees, rotate_quarters},
    grid::coords::{CoordinateSystem, unit_vector},
    model::{
        motion::{Color, Location, MotionData, Orientation},
        pictograph::PictographData,
    },
};

/// How a prop lies relative to the grid center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropVariant {
    /// Long axis points through the center (in/out).
    Radial,
    /// Long axis is tangent to the ring (clock/counter).
    Nonradial,
}

impl PropVariant {
    /// Variant drawn for a prop ending at `ori`.
    pub fn of(ori: Orientation) -> Self {
        if ori.is_radial() {
            PropVariant::Radial
        } else {
            PropVariant::Nonradial
        }
    }
}

/// Final placement of one prop.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PropData {
    pub color: Color,
    /// End location of the motion.
    pub location: Location,
    /// Scene coordinate, separation included.
    pub coordinate: Point,
    /// Heading of the prop head in degrees.
    pub rotation_angle: f64,
    pub variant: PropVariant,
    /// Offset applied to pull overlapping props apart.
    pub separation: Vec2,
}

/// Heading of a prop head at `loc` with orientation `ori`.
pub fn prop_rotation(loc: Location, ori: Orientation) -> f64 {
    let offset = match ori {
        Orientation::Out => 0.0,
        Orientation::Clock => 90.0,
        Orientation::In => 180.0,
        Orientation::Counter => 270.0,
    };
    normalize_degrees(loc.bearing_degrees() + offset)
}

/// Places props for whole pictographs.
#[derive(Clone, Copy, Debug)]
pub struct PropPositioner<'a> {
    coords: &'a CoordinateSystem,
    beta_offset: f64,
}

impl<'a> PropPositioner<'a> {
    /// `beta_offset` is the distance each prop moves when two overlap.
    pub fn new(coords: &'a CoordinateSystem, beta_offset: f64) -> Self {
        Self {
            coords,
            beta_offset,
        }
    }

    /// Prop for every colour at its end location. Blank pictographs have no props.
    pub fn compute_prop_placements(
        &self,
        pictograph: &PictographData,
    ) -> BTreeMap<Color, PropData> {
        let Some(motions) = &pictograph.motions else {
            return BTreeMap::new();
        };
        let overlap = motions.blue.end_loc == motions.red.end_loc
            && PropVariant::of(motions.blue.end_ori) == PropVariant::of(motions.red.end_ori);

        motions
            .iter()
            .map(|(color, motion)| {
                let separation = if overlap {
                    self.separation(color, motion)
                } else {
                    Vec2::ZERO
                };
                let base = self
                    .coords
                    .location_to_point(motion.end_loc, pictograph.grid_mode);
                let prop = PropData {
                    color,
                    location: motion.end_loc,
                    coordinate: base + separation,
                    rotation_angle: prop_rotation(motion.end_loc, motion.end_ori),
                    variant: PropVariant::of(motion.end_ori),
                    separation,
                };
                (color, prop)
            })
            .collect()
    }

    // Perpendicular to the long axis; blue clockwise, red counter-clockwise.
    fn separation(&self, color: Color, motion: &MotionData) -> Vec2 {
        let radial = unit_vector(motion.end_loc);
        let perpendicular = match PropVariant::of(motion.end_ori) {
            PropVariant::Radial => rotate_quarters(radial, 1),
            PropVariant::Nonradial => radial,
        };
        let sign = match color {
            Color::Blue => 1.0,
            Color::Red => -1.0,
        };
        perpendicular * (sign * self.beta_offset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prop/placement.rs"]
mod tests;
