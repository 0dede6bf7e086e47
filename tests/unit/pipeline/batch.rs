use super::*;
use crate::model::{
    motion::{Location, MotionData, MotionType, Orientation, RotationDirection, Turns},
    pictograph::ColorPair,
};

fn pro(start: Location, end: Location) -> MotionData {
    MotionData::resolved(
        MotionType::Pro,
        RotationDirection::Clockwise,
        start,
        end,
        Turns::ZERO,
        Orientation::In,
    )
    .unwrap()
}

fn sequence() -> SequenceData {
    let start = PictographData::from_motions(
        GridMode::Diamond,
        None,
        ColorPair::new(
            MotionData::static_at(Location::South, Orientation::In),
            MotionData::static_at(Location::North, Orientation::In),
        ),
    )
    .unwrap();
    let a = PictographData::from_motions(
        GridMode::Diamond,
        None,
        ColorPair::new(
            pro(Location::South, Location::West),
            pro(Location::North, Location::East),
        ),
    )
    .unwrap();
    let b = PictographData::from_motions(
        GridMode::Diamond,
        None,
        ColorPair::new(
            pro(Location::West, Location::North),
            pro(Location::East, Location::South),
        ),
    )
    .unwrap();
    SequenceData::new()
        .with_start_position(start)
        .unwrap()
        .append_beat(a, 1.0)
        .unwrap()
        .append_beat(b, 1.0)
        .unwrap()
}

#[test]
fn sequence_places_start_and_beats_in_order() {
    let ctx = PlacementContext::with_defaults().unwrap();
    let (placements, stats) =
        place_sequence(&ctx, &sequence(), &BatchThreading::default()).unwrap();
    assert_eq!(
        placements.iter().map(|b| b.beat).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        stats,
        PlacementStats {
            pictographs_total: 3,
            pictographs_placed: 3,
            placeholders: 0,
        }
    );
}

#[test]
fn parallel_and_serial_results_match() {
    let seq = sequence();
    let serial_ctx = PlacementContext::with_defaults().unwrap();
    let parallel_ctx = PlacementContext::with_defaults().unwrap();
    let (serial, _) = place_sequence(&serial_ctx, &seq, &BatchThreading::default()).unwrap();
    let (parallel, _) = place_sequence(
        &parallel_ctx,
        &seq,
        &BatchThreading {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();
    let renders = |v: &[BeatPlacement]| v.iter().map(|b| b.render.clone()).collect::<Vec<_>>();
    assert_eq!(renders(&serial), renders(&parallel));
}

#[test]
fn zero_threads_is_rejected() {
    let ctx = PlacementContext::with_defaults().unwrap();
    let err = place_all(
        &ctx,
        &[],
        &BatchThreading {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, KineticError::Validation(_)));
}

#[test]
fn bad_pictograph_does_not_fail_the_batch() {
    let ctx = PlacementContext::with_defaults().unwrap();
    let good = sequence().beats[0].pictograph.clone();
    let mut bad = good.clone();
    let mut motions = bad.motions.unwrap();
    motions.blue.end_loc = Location::North;
    bad.motions = Some(motions);

    let out = place_all(&ctx, &[good, bad], &BatchThreading::default()).unwrap();
    assert!(!out[0].is_placeholder());
    assert!(out[1].is_placeholder());
}

#[test]
fn placeholder_serializes_with_reason() {
    let render = PictographRender::Placeholder {
        reason: PlacementError::LocationResolution {
            color: Color::Red,
            motion_type: MotionType::Anti,
            start_loc: Location::East,
            end_loc: Location::West,
            grid_mode: GridMode::Diamond,
        },
    };
    let json = serde_json::to_value(&render).unwrap();
    assert_eq!(json["status"], "placeholder");
    assert_eq!(json["reason"]["kind"], "location_resolution");
    assert_eq!(json["reason"]["color"], "red");
}
