//! Pictograph positioning and motion resolution for The Kinetic Alphabet.
//!
//! A pictograph is two simultaneous prop motions (blue and red) drawn on a grid.
//! This crate turns motion data into placed arrows and props, resolves letters and
//! start positions from a tabular dataset, and builds sequences beat by beat.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: dataset rows -> [`PictographData`] ([`PictographResolver`])
//! 2. **Build**: start position + beats -> [`SequenceData`] (continuity checked,
//!    orientations propagated)
//! 3. **Place**: [`PictographData`] -> [`PictographPlacement`] (arrow location, rotation
//!    and fine adjustment, then props) through a shared [`PlacementContext`]
//! 4. **Persist**: [`SequenceData`] <-> sequence JSON
//!
//! Placement is deterministic and side-effect free. A pictograph whose arrows cannot
//! be located fails as a whole with [`PlacementError`], which callers turn into
//! [`PictographRender::Placeholder`].
#![forbid(unsafe_code)]

mod arrow;
mod foundation;
mod grid;
mod model;
mod persist;
mod pipeline;
mod prop;
mod resolve;

pub use arrow::adjustment::{
    AdjustmentTier, ArrowAdjustment, SpecialPlacementEntry, SpecialPlacements, quadrant,
};
pub use arrow::location::{arrow_location, midpoint};
pub use arrow::placement::{ArrowData, ArrowPositioner};
pub use arrow::rotation::{arrow_rotation, base_rotation, effective_direction, is_mirrored};
pub use foundation::core::{Canvas, Point, Vec2, normalize_degrees, rotate_quarters};
pub use foundation::error::{KineticError, KineticResult, PlacementError};
pub use grid::coords::{CoordinateSystem, REFERENCE_CANVAS_SIZE, unit_vector};
pub use model::motion::{
    Color, GridMode, Handpath, Location, MotionData, MotionType, Orientation, RotationDirection,
    Turns,
};
pub use model::orientation::end_orientation;
pub use model::pictograph::{ColorPair, Letter, LetterType, PictographData};
pub use model::position::{GridPosition, PositionGroup, PositionKey};
pub use model::sequence::{BeatData, SequenceData, SequenceState};
pub use persist::sequence_json::{
    from_json_str as sequence_from_json_str, from_json_value as sequence_from_json_value,
    read_sequence_json, to_json_string_pretty as sequence_to_json_string_pretty,
    to_json_value as sequence_to_json_value,
};
pub use pipeline::batch::{
    BatchThreading, BeatPlacement, PictographPlacement, PictographRender, PlacementStats,
    place_all, place_sequence,
};
pub use pipeline::cache::{CacheStats, PlacementCache};
pub use pipeline::context::{PlacementConfig, PlacementContext};
pub use pipeline::fingerprint::{PictographFingerprint, fingerprint_pictograph};
pub use prop::placement::{PropData, PropPositioner, PropVariant, prop_rotation};
pub use resolve::dataset::{DatasetRow, DatasetTable, MotionSignature, PictographDataset};
pub use resolve::resolver::{PictographResolver, parse_position_key};
