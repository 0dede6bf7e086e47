use crate::{
    foundation::core::normalize_degrees,
    model::motion::{Handpath, Location, MotionData, MotionType, RotationDirection},
};

/// Glyph rotation relative to the arrow location's bearing.
///
/// Clockwise and counter-clockwise variants of a motion type are always 180 degrees
/// apart. Float motions carry no spin, so `dir` is their handpath direction.
pub fn base_rotation(motion_type: MotionType, dir: RotationDirection) -> f64 {
    let cw = match motion_type {
        MotionType::Pro | MotionType::Float => 90.0,
        MotionType::Anti => 270.0,
        MotionType::Dash | MotionType::Static => 0.0,
    };
    match dir {
        RotationDirection::Clockwise => cw,
        RotationDirection::CounterClockwise => normalize_degrees(cw + 180.0),
        RotationDirection::NoRotation => 0.0,
    }
}

/// Direction that decides the glyph's rotation and mirroring.
pub fn effective_direction(motion: &MotionData) -> RotationDirection {
    if motion.motion_type != MotionType::Float {
        return motion.prop_rot_dir;
    }
    match motion.handpath() {
        Some(Handpath::Clockwise) => RotationDirection::Clockwise,
        Some(Handpath::CounterClockwise) => RotationDirection::CounterClockwise,
        _ => RotationDirection::NoRotation,
    }
}

/// Final glyph rotation in degrees, in `[0, 360)`.
pub fn arrow_rotation(motion: &MotionData, location: Location) -> f64 {
    let dir = effective_direction(motion);
    match (motion.motion_type, dir) {
        // Unspun dashes point along the line of travel.
        (MotionType::Dash, RotationDirection::NoRotation) => motion.end_loc.bearing_degrees(),
        (_, RotationDirection::NoRotation) => 0.0,
        (motion_type, dir) => {
            normalize_degrees(base_rotation(motion_type, dir) + location.bearing_degrees())
        }
    }
}

/// Counter-clockwise glyphs are drawn as the mirror image of the clockwise ones.
pub fn is_mirrored(motion: &MotionData) -> bool {
    effective_direction(motion) == RotationDirection::CounterClockwise
}

#[cfg(test)]
#[path = "../../tests/unit/arrow/rotation.rs"]
mod tests;
