use super::*;
use crate::model::{
    motion::{GridMode, Location, MotionType, Orientation, RotationDirection, Turns},
    pictograph::{ColorPair, Letter},
};

fn sample() -> PictographData {
    let pro = |start, end| {
        MotionData::resolved(
            MotionType::Pro,
            RotationDirection::Clockwise,
            start,
            end,
            Turns::ZERO,
            Orientation::In,
        )
        .unwrap()
    };
    PictographData::from_motions(
        GridMode::Diamond,
        Some(Letter::new("A").unwrap()),
        ColorPair::new(
            pro(Location::South, Location::West),
            pro(Location::North, Location::East),
        ),
    )
    .unwrap()
}

#[test]
fn equal_pictographs_share_a_fingerprint() {
    assert_eq!(fingerprint_pictograph(&sample()), fingerprint_pictograph(&sample()));
}

#[test]
fn metadata_is_ignored() {
    let tagged = sample().with_metadata("note", serde_json::json!("x"));
    assert_eq!(fingerprint_pictograph(&sample()), fingerprint_pictograph(&tagged));
}

#[test]
fn placement_inputs_change_the_fingerprint() {
    let base = fingerprint_pictograph(&sample());
    let relettered = sample().with_letter(Some(Letter::new("B").unwrap()));
    assert_ne!(base, fingerprint_pictograph(&relettered));
    assert_ne!(base, fingerprint_pictograph(&sample().color_swapped()));
    assert_ne!(
        base,
        fingerprint_pictograph(&sample().map_motions(|m| m.with_turns(Turns::from_halves(2))))
    );
    assert_ne!(
        fingerprint_pictograph(&PictographData::blank(GridMode::Diamond)),
        fingerprint_pictograph(&PictographData::blank(GridMode::Box))
    );
}
