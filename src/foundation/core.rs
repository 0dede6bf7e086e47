use crate::foundation::error::{KineticError, KineticResult};

pub use kurbo::{Point, Vec2};

/// Pixel dimensions of the pictograph scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Square canvas, the shape every pictograph is authored for.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Validate that both dimensions are non-zero.
    pub fn validate(self) -> KineticResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KineticError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Side length used for grid scaling (the shorter side).
    pub fn size(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Scene center.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) * 0.5, f64::from(self.height) * 0.5)
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if d >= 360.0 { 0.0 } else { d }
}

/// Rotate a vector by `quarters * 90` degrees clockwise in screen space (y down).
pub fn rotate_quarters(v: Vec2, quarters: u8) -> Vec2 {
    match quarters % 4 {
        0 => v,
        1 => Vec2::new(-v.y, v.x),
        2 => Vec2::new(-v.x, -v.y),
        _ => Vec2::new(v.y, -v.x),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
