//! Grid coordinate system.
//!
//! Each grid mode has four hand points on a ring around the center and four
//! layer-2 points halfway between neighbouring hand points. The diamond grid puts
//! its hand points on n/e/s/w, the box grid on the diagonals, so the two modes map
//! the same [`Location`] to different coordinates.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::{
    foundation::core::{Canvas, Point, Vec2},
    model::motion::{GridMode, Location},
};

/// Canvas side length that tuning offsets are authored against.
pub const REFERENCE_CANVAS_SIZE: f64 = 950.0;

/// Maps grid locations to scene coordinates for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateSystem {
    canvas: Canvas,
    hand_radius: f64,
}

impl CoordinateSystem {
    /// Build for `canvas`; hand points sit `hand_point_ratio * canvas.size()` from the center.
    pub fn new(canvas: Canvas, hand_point_ratio: f64) -> Self {
        Self {
            canvas,
            hand_radius: canvas.size() * hand_point_ratio,
        }
    }

    /// Canvas this system maps onto.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Distance from the center to a hand point.
    pub fn hand_radius(&self) -> f64 {
        self.hand_radius
    }

    /// Factor from reference-canvas pixels to this canvas.
    pub fn scale(&self) -> f64 {
        self.canvas.size() / REFERENCE_CANVAS_SIZE
    }

    /// Scene coordinate of `loc` on a `grid_mode` grid.
    pub fn location_to_point(&self, loc: Location, grid_mode: GridMode) -> Point {
        let radius = if grid_mode.is_hand_point(loc) {
            self.hand_radius
        } else {
            self.hand_radius * FRAC_1_SQRT_2
        };
        self.canvas.center() + unit_vector(loc) * radius
    }

    /// The four hand points of `grid_mode`, clockwise from the first.
    pub fn hand_points(&self, grid_mode: GridMode) -> Vec<(Location, Point)> {
        Location::ALL
            .into_iter()
            .filter(|l| grid_mode.is_hand_point(*l))
            .map(|l| (l, self.location_to_point(l, grid_mode)))
            .collect()
    }

    /// Closest location to `point` (ties resolve to the earlier location clockwise from north).
    pub fn nearest_location(&self, point: Point, grid_mode: GridMode) -> Location {
        let mut best = Location::North;
        let mut best_dist = f64::INFINITY;
        for loc in Location::ALL {
            let d = self.location_to_point(loc, grid_mode).distance_squared(point);
            if d < best_dist {
                best = loc;
                best_dist = d;
            }
        }
        best
    }
}

/// Exact unit direction from the center toward `loc` (screen space, y down).
pub fn unit_vector(loc: Location) -> Vec2 {
    let d = FRAC_1_SQRT_2;
    match loc {
        Location::North => Vec2::new(0.0, -1.0),
        Location::NorthEast => Vec2::new(d, -d),
        Location::East => Vec2::new(1.0, 0.0),
        Location::SouthEast => Vec2::new(d, d),
        Location::South => Vec2::new(0.0, 1.0),
        Location::SouthWest => Vec2::new(-d, d),
        Location::West => Vec2::new(-1.0, 0.0),
        Location::NorthWest => Vec2::new(-d, -d),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/coords.rs"]
mod tests;
