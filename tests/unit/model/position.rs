use super::*;

#[test]
fn parse_and_display_roundtrip() {
    for name in ["alpha1", "beta8", "gamma16", "gamma9"] {
        let p: GridPosition = name.parse().unwrap();
        assert_eq!(p.to_string(), name);
    }
}

#[test]
fn parse_rejects_out_of_range_and_unknown_families() {
    assert!("alpha0".parse::<GridPosition>().is_err());
    assert!("alpha9".parse::<GridPosition>().is_err());
    assert!("gamma17".parse::<GridPosition>().is_err());
    assert!("delta1".parse::<GridPosition>().is_err());
    assert!("alpha".parse::<GridPosition>().is_err());
    assert!("alpha1x".parse::<GridPosition>().is_err());
}

#[test]
fn locations_table_matches_named_positions() {
    let alpha1: GridPosition = "alpha1".parse().unwrap();
    assert_eq!(alpha1.locations(), (Location::South, Location::North));
    let alpha3: GridPosition = "alpha3".parse().unwrap();
    assert_eq!(alpha3.locations(), (Location::West, Location::East));
    let gamma11: GridPosition = "gamma11".parse().unwrap();
    assert_eq!(gamma11.locations(), (Location::South, Location::East));
}

#[test]
fn from_locations_inverts_every_position() {
    for group in [PositionGroup::Alpha, PositionGroup::Beta, PositionGroup::Gamma] {
        let n = group.table().len() as u8;
        for number in 1..=n {
            let p = GridPosition::new(group, number).unwrap();
            let (blue, red) = p.locations();
            assert_eq!(GridPosition::from_locations(blue, red), Some(p));
        }
    }
    assert_eq!(
        GridPosition::from_locations(Location::North, Location::NorthEast),
        None
    );
}

#[test]
fn even_alpha_positions_live_on_the_box_grid() {
    let alpha2: GridPosition = "alpha2".parse().unwrap();
    assert_eq!(alpha2.grid_mode(), GridMode::Box);
    let beta5: GridPosition = "beta5".parse().unwrap();
    assert_eq!(beta5.grid_mode(), GridMode::Diamond);
}

#[test]
fn position_key_parses_pairs() {
    let key: PositionKey = "alpha1_alpha3".parse().unwrap();
    assert_eq!(key.start.to_string(), "alpha1");
    assert_eq!(key.end.to_string(), "alpha3");
    assert!(!key.is_stationary());
    assert_eq!(key.to_string(), "alpha1_alpha3");

    assert!("alpha1alpha3".parse::<PositionKey>().is_err());
    assert!("alpha1_".parse::<PositionKey>().is_err());
    assert!("alpha1_alpha3_beta1".parse::<PositionKey>().is_err());
}

#[test]
fn grid_position_serializes_as_string() {
    let p: GridPosition = "beta3".parse().unwrap();
    assert_eq!(serde_json::to_string(&p).unwrap(), "\"beta3\"");
    let back: GridPosition = serde_json::from_str("\"beta3\"").unwrap();
    assert_eq!(back, p);
    assert!(serde_json::from_str::<GridPosition>("\"beta0\"").is_err());
}
