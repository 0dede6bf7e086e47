use super::*;
use crate::model::{
    motion::{GridMode, Location, MotionType, Orientation, Turns},
    pictograph::Letter,
};

fn shift(dir: RotationDirection, start: Location, end: Location) -> MotionData {
    MotionData::resolved(MotionType::Pro, dir, start, end, Turns::ZERO, Orientation::In).unwrap()
}

fn pictograph(letter: &str, blue: MotionData, red: MotionData) -> PictographData {
    PictographData::from_motions(
        GridMode::Diamond,
        Some(Letter::new(letter).unwrap()),
        ColorPair::new(blue, red),
    )
    .unwrap()
}

fn alpha1_start() -> PictographData {
    pictograph(
        "α",
        MotionData::static_at(Location::South, Orientation::In),
        MotionData::static_at(Location::North, Orientation::In),
    )
}

fn cw_step(from_blue: Location, from_red: Location) -> PictographData {
    use RotationDirection::Clockwise;
    pictograph(
        "A",
        shift(Clockwise, from_blue, from_blue.rotated(2)),
        shift(Clockwise, from_red, from_red.rotated(2)),
    )
}

fn four_beat_sequence() -> SequenceData {
    let mut seq = SequenceData::new().with_start_position(alpha1_start()).unwrap();
    let mut blue = Location::South;
    let mut red = Location::North;
    for _ in 0..4 {
        seq = seq.append_beat(cw_step(blue, red), 1.0).unwrap();
        blue = blue.rotated(2);
        red = red.rotated(2);
    }
    seq
}

#[test]
fn empty_sequence_rejects_beats() {
    let seq = SequenceData::new();
    assert_eq!(seq.state(), SequenceState::Empty);
    assert!(seq.append_beat(cw_step(Location::South, Location::North), 1.0).is_err());
}

#[test]
fn start_position_must_be_stationary() {
    let seq = SequenceData::new();
    assert!(
        seq.with_start_position(cw_step(Location::South, Location::North))
            .is_err()
    );
    let seq = seq.with_start_position(alpha1_start()).unwrap();
    assert_eq!(seq.state(), SequenceState::Building);
    assert_eq!(seq.end_position().unwrap().to_string(), "alpha1");
}

#[test]
fn append_enforces_continuity() {
    let seq = SequenceData::new().with_start_position(alpha1_start()).unwrap();
    // alpha3 -> alpha5 cannot follow a sequence ending at alpha1.
    let err = seq
        .append_beat(cw_step(Location::West, Location::East), 1.0)
        .unwrap_err();
    assert!(err.to_string().contains("alpha3"));
    assert!(seq.is_empty());
}

#[test]
fn append_numbers_beats_and_leaves_receiver_untouched() {
    let start = SequenceData::new().with_start_position(alpha1_start()).unwrap();
    let one = start
        .append_beat(cw_step(Location::South, Location::North), 1.0)
        .unwrap();
    assert!(start.is_empty());
    assert_eq!(one.len(), 1);
    assert_eq!(one.beats[0].beat_number, 1);
    assert_eq!(one.end_position().unwrap().to_string(), "alpha3");
    assert_eq!(one.word(), "A");
    assert!(one.validate().is_ok());
}

#[test]
fn orientations_propagate_between_beats() {
    let start = SequenceData::new().with_start_position(alpha1_start()).unwrap();
    let turned = cw_step(Location::South, Location::North)
        .map_motions(|m| m.with_turns(Turns::from_halves(2)));
    let seq = start.append_beat(turned, 1.0).unwrap();
    let blue = seq.beats[0].pictograph.motion(Color::Blue).unwrap();
    assert_eq!(blue.end_ori, Orientation::Out);

    let seq = seq
        .append_beat(cw_step(Location::West, Location::East), 1.0)
        .unwrap();
    let blue = seq.beats[1].pictograph.motion(Color::Blue).unwrap();
    assert_eq!(blue.start_ori, Orientation::Out);
    assert_eq!(blue.end_ori, Orientation::Out);
}

#[test]
fn reversal_detected_when_spin_changes() {
    use RotationDirection::{Clockwise, CounterClockwise};
    let seq = SequenceData::new()
        .with_start_position(alpha1_start())
        .unwrap()
        .append_beat(cw_step(Location::South, Location::North), 1.0)
        .unwrap();
    let back = pictograph(
        "B",
        shift(CounterClockwise, Location::West, Location::South),
        shift(Clockwise, Location::East, Location::South),
    );
    let seq = seq.append_beat(back, 1.0).unwrap();
    assert!(seq.beats[1].blue_reversal);
    assert!(!seq.beats[1].red_reversal);
    assert!(!seq.beats[0].blue_reversal);
}

#[test]
fn deleting_a_beat_removes_everything_after_it() {
    let seq = four_beat_sequence();
    assert_eq!(seq.len(), 4);
    let trimmed = seq.delete_beat(2).unwrap();
    assert_eq!(trimmed.len(), 1);
    assert_eq!(trimmed.beats[0].beat_number, 1);
    assert_eq!(trimmed.state(), SequenceState::Building);
    assert_eq!(seq.len(), 4);
}

#[test]
fn deleting_start_position_empties_sequence() {
    let seq = four_beat_sequence().delete_beat(0).unwrap();
    assert_eq!(seq.state(), SequenceState::Empty);
    assert!(seq.is_empty());
    assert!(four_beat_sequence().delete_beat(9).is_err());
}

#[test]
fn validate_catches_gaps_and_breaks() {
    let mut seq = four_beat_sequence();
    assert!(seq.validate().is_ok());
    seq.beats[2].beat_number = 7;
    assert!(seq.validate().is_err());

    let mut broken = four_beat_sequence();
    broken.beats.remove(1);
    broken.beats[1].beat_number = 2;
    broken.beats[2].beat_number = 3;
    assert!(broken.validate().is_err());
}

#[test]
fn transforms_preserve_continuity() {
    let seq = four_beat_sequence();
    for t in [seq.mirrored(), seq.rotated(2), seq.rotated(1), seq.color_swapped()] {
        assert!(t.validate().is_ok());
        assert_eq!(t.len(), 4);
    }
    assert_eq!(seq.rotated(1).beats[0].pictograph.grid_mode, GridMode::Box);
}
