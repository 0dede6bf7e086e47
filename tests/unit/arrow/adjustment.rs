use super::*;
use crate::model::motion::{Orientation, RotationDirection};

fn entry(
    letter: Option<&str>,
    motion_type: MotionType,
    turns: Option<f64>,
    offset: [f64; 2],
) -> SpecialPlacementEntry {
    SpecialPlacementEntry {
        grid_mode: GridMode::Diamond,
        letter: letter.map(|l| Letter::new(l).unwrap()),
        motion_type,
        turns: turns.map(|t| Turns::from_f64(t).unwrap()),
        offset,
    }
}

fn pro(turns: f64) -> MotionData {
    MotionData {
        motion_type: MotionType::Pro,
        prop_rot_dir: RotationDirection::Clockwise,
        start_loc: Location::North,
        end_loc: Location::East,
        turns: Turns::from_f64(turns).unwrap(),
        start_ori: Orientation::In,
        end_ori: Orientation::In,
    }
}

fn table() -> SpecialPlacements {
    SpecialPlacements::from_entries([
        entry(Some("A"), MotionType::Pro, Some(1.0), [10.0, -10.0]),
        entry(Some("A"), MotionType::Pro, None, [20.0, -20.0]),
        entry(None, MotionType::Pro, Some(2.0), [30.0, -30.0]),
        entry(None, MotionType::Pro, None, [40.0, -40.0]),
    ])
    .unwrap()
}

#[test]
fn tiers_are_searched_from_specific_to_general() {
    let t = table();
    let a = Letter::new("A").unwrap();
    let b = Letter::new("B").unwrap();

    assert_eq!(
        t.lookup(GridMode::Diamond, Some(&a), MotionType::Pro, Turns::from_halves(2)),
        (AdjustmentTier::Exact, Vec2::new(10.0, -10.0))
    );
    assert_eq!(
        t.lookup(GridMode::Diamond, Some(&a), MotionType::Pro, Turns::from_halves(4)),
        (AdjustmentTier::LetterAnyTurns, Vec2::new(20.0, -20.0))
    );
    assert_eq!(
        t.lookup(GridMode::Diamond, Some(&b), MotionType::Pro, Turns::from_halves(4)),
        (AdjustmentTier::TypeAndTurns, Vec2::new(30.0, -30.0))
    );
    assert_eq!(
        t.lookup(GridMode::Diamond, None, MotionType::Pro, Turns::ZERO),
        (AdjustmentTier::TypeOnly, Vec2::new(40.0, -40.0))
    );
}

#[test]
fn miss_falls_back_to_zero_every_time() {
    let t = table();
    let first = t.lookup(GridMode::Box, None, MotionType::Pro, Turns::ZERO);
    let second = t.lookup(GridMode::Box, None, MotionType::Pro, Turns::ZERO);
    assert_eq!(first, (AdjustmentTier::Fallback, Vec2::ZERO));
    assert_eq!(first, second);

    let empty = SpecialPlacements::empty();
    let adj =
        empty.adjustment_for(GridMode::Diamond, None, &pro(0.0), Location::SouthWest, 1.0);
    assert_eq!(adj.tier, AdjustmentTier::Fallback);
    assert_eq!(adj.offset, Vec2::ZERO);
}

#[test]
fn offsets_rotate_into_quadrant_and_scale() {
    let t = table();
    let m = pro(0.0);
    let ne = t.adjustment_for(GridMode::Diamond, None, &m, Location::NorthEast, 1.0);
    assert_eq!(ne.offset, Vec2::new(40.0, -40.0));

    let se = t.adjustment_for(GridMode::Diamond, None, &m, Location::SouthEast, 1.0);
    assert_eq!(se.offset, Vec2::new(40.0, 40.0));

    let sw = t.adjustment_for(GridMode::Diamond, None, &m, Location::SouthWest, 0.5);
    assert_eq!(sw.offset, Vec2::new(-20.0, 20.0));

    let nw = t.adjustment_for(GridMode::Diamond, None, &m, Location::NorthWest, 1.0);
    assert_eq!(nw.offset, Vec2::new(-40.0, -40.0));
}

#[test]
fn loads_from_json_with_wildcards() {
    let json = r#"[
        {"grid_mode": "diamond", "letter": "A", "motion_type": "pro", "turns": 1, "offset": [5, -5]},
        {"grid_mode": "box", "motion_type": "anti", "offset": [0, 12.5]}
    ]"#;
    let t = SpecialPlacements::from_json_str(json).unwrap();
    assert_eq!(t.len(), 2);
    assert_eq!(
        t.lookup(GridMode::Box, None, MotionType::Anti, Turns::from_halves(3)),
        (AdjustmentTier::TypeOnly, Vec2::new(0.0, 12.5))
    );
}

#[test]
fn duplicate_and_non_finite_entries_are_rejected() {
    let dup = SpecialPlacements::from_entries([
        entry(None, MotionType::Dash, None, [1.0, 1.0]),
        entry(None, MotionType::Dash, None, [2.0, 2.0]),
    ]);
    assert!(matches!(dup, Err(KineticError::Validation(_))));

    let nan =
        SpecialPlacements::from_entries([entry(None, MotionType::Dash, None, [f64::NAN, 0.0])]);
    assert!(matches!(nan, Err(KineticError::Validation(_))));

    assert!(matches!(
        SpecialPlacements::from_json_str("{"),
        Err(KineticError::Serde(_))
    ));
}

#[test]
fn quadrant_groups_neighbouring_locations() {
    assert_eq!(quadrant(Location::North), 0);
    assert_eq!(quadrant(Location::NorthEast), 0);
    assert_eq!(quadrant(Location::East), 1);
    assert_eq!(quadrant(Location::SouthWest), 2);
    assert_eq!(quadrant(Location::NorthWest), 3);
}
