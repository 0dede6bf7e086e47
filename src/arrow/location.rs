use crate::{
    foundation::error::PlacementError,
    model::motion::{Color, GridMode, Location, MotionData, MotionType},
};

use Location::{
    East as E, North as N, NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE,
    SouthWest as SW, West as W,
};

// Unordered quarter-turn pairs and the layer-2 location between them.
const DIAMOND_MIDPOINTS: [(Location, Location, Location); 4] =
    [(N, E, NE), (E, S, SE), (S, W, SW), (W, N, NW)];

const BOX_MIDPOINTS: [(Location, Location, Location); 4] =
    [(NE, SE, E), (SE, SW, S), (SW, NW, W), (NW, NE, N)];

/// Location between two quarter-adjacent hand points of `grid_mode`.
pub fn midpoint(a: Location, b: Location, grid_mode: GridMode) -> Option<Location> {
    let table = match grid_mode {
        GridMode::Diamond => &DIAMOND_MIDPOINTS,
        GridMode::Box => &BOX_MIDPOINTS,
    };
    table
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, mid)| *mid)
}

/// Nominal arrow location for `motion`, before fine adjustment.
///
/// Shift arrows sit between start and end, dash arrows beside the start location
/// in the spin direction, static arrows on the start location.
pub fn arrow_location(
    color: Color,
    motion: &MotionData,
    grid_mode: GridMode,
) -> Result<Location, PlacementError> {
    match motion.motion_type {
        MotionType::Pro | MotionType::Anti | MotionType::Float => {
            midpoint(motion.start_loc, motion.end_loc, grid_mode).ok_or(
                PlacementError::LocationResolution {
                    color,
                    motion_type: motion.motion_type,
                    start_loc: motion.start_loc,
                    end_loc: motion.end_loc,
                    grid_mode,
                },
            )
        }
        MotionType::Dash => Ok(motion.start_loc.quarter_turn(motion.prop_rot_dir)),
        MotionType::Static => Ok(motion.start_loc),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/arrow/location.rs"]
mod tests;
