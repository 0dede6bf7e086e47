use super::*;

fn system() -> CoordinateSystem {
    CoordinateSystem::new(Canvas::square(1000), 0.15)
}

#[test]
fn diamond_and_box_differ_for_the_same_location() {
    let cs = system();
    let diamond = cs.location_to_point(Location::North, GridMode::Diamond);
    let boxed = cs.location_to_point(Location::North, GridMode::Box);
    assert_ne!(diamond, boxed);
    assert_eq!(diamond, Point::new(500.0, 350.0));
}

#[test]
fn mapping_is_stable_across_calls() {
    let cs = system();
    for mode in [GridMode::Diamond, GridMode::Box] {
        for loc in Location::ALL {
            let a = cs.location_to_point(loc, mode);
            let b = cs.location_to_point(loc, mode);
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }
}

#[test]
fn layer2_points_sit_between_hand_points() {
    let cs = system();
    let n = cs.location_to_point(Location::North, GridMode::Diamond);
    let e = cs.location_to_point(Location::East, GridMode::Diamond);
    let ne = cs.location_to_point(Location::NorthEast, GridMode::Diamond);
    assert!((ne.x - (n.x + e.x) * 0.5).abs() < 1e-9);
    assert!((ne.y - (n.y + e.y) * 0.5).abs() < 1e-9);
}

#[test]
fn hand_points_follow_grid_mode() {
    let cs = system();
    let diamond: Vec<Location> = cs
        .hand_points(GridMode::Diamond)
        .into_iter()
        .map(|(l, _)| l)
        .collect();
    assert_eq!(
        diamond,
        vec![Location::North, Location::East, Location::South, Location::West]
    );
    let boxed: Vec<Location> = cs
        .hand_points(GridMode::Box)
        .into_iter()
        .map(|(l, _)| l)
        .collect();
    assert!(boxed.iter().all(|l| !l.is_cardinal()));
}

#[test]
fn nearest_location_inverts_mapping() {
    let cs = system();
    for mode in [GridMode::Diamond, GridMode::Box] {
        for loc in Location::ALL {
            let p = cs.location_to_point(loc, mode) + Vec2::new(3.0, -2.0);
            assert_eq!(cs.nearest_location(p, mode), loc);
        }
    }
}

#[test]
fn scale_is_relative_to_reference_canvas() {
    let cs = CoordinateSystem::new(Canvas::square(475), 0.15);
    assert_eq!(cs.scale(), 0.5);
}
