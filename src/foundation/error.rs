use crate::model::motion::{Color, GridMode, Location, MotionType};

/// Convenience result type used across the crate.
pub type KineticResult<T> = Result<T, KineticError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum KineticError {
    /// Invalid user-provided motion, pictograph or sequence data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pictograph could not be placed.
    #[error("placement error: {0}")]
    Placement(#[from] PlacementError),

    /// Malformed or unusable tabular dataset.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KineticError {
    /// Build a [`KineticError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KineticError::Dataset`] value.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Build a [`KineticError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure to place a single pictograph.
///
/// Placement is atomic: one failing motion fails the whole pictograph.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementError {
    /// The arrow location of a motion is not defined for its start/end pair.
    #[error(
        "no arrow location for {color} {motion_type} motion {start_loc}->{end_loc} on {grid_mode} grid"
    )]
    LocationResolution {
        /// Colour channel of the failing motion.
        color: Color,
        /// Motion type of the failing motion.
        motion_type: MotionType,
        /// Start location of the failing motion.
        start_loc: Location,
        /// End location of the failing motion.
        end_loc: Location,
        /// Grid mode the lookup ran against.
        grid_mode: GridMode,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
