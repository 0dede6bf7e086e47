use super::*;
use crate::{
    model::motion::{Location, MotionType, Orientation, RotationDirection, Turns},
    resolve::dataset::DatasetTable,
};

const DIAMOND: &str = include_str!("../../../data/diamond_pictographs.csv");

fn dataset() -> PictographDataset {
    let mut d = PictographDataset::new();
    d.insert(
        GridMode::Diamond,
        DatasetTable::from_csv_reader(DIAMOND.as_bytes()).unwrap(),
    );
    d
}

fn pro(dir: RotationDirection, start: Location, end: Location, turns: u32) -> MotionData {
    MotionData::resolved(
        MotionType::Pro,
        dir,
        start,
        end,
        Turns::from_halves(turns),
        Orientation::In,
    )
    .unwrap()
}

#[test]
fn parse_position_key_accepts_only_well_formed_keys() {
    let key = parse_position_key("alpha1_alpha3").unwrap();
    assert_eq!(key.to_string(), "alpha1_alpha3");
    assert!(parse_position_key("alpha1alpha3").is_none());
    assert!(parse_position_key("delta1_alpha1").is_none());
    assert!(parse_position_key("alpha9_alpha1").is_none());
    assert!(parse_position_key("").is_none());
}

#[test]
fn start_position_returns_the_static_alpha_row() {
    let d = dataset();
    let p = PictographResolver::new(&d)
        .start_position("alpha1_alpha1", GridMode::Diamond)
        .unwrap();
    assert_eq!(p.letter.as_ref().map(Letter::as_str), Some("α"));
    let motions = p.motions.unwrap();
    assert_eq!(motions.blue.motion_type, MotionType::Static);
    assert_eq!(motions.blue.prop_rot_dir, RotationDirection::Clockwise);
    assert_eq!(motions.blue.start_loc, Location::South);
    assert_eq!(motions.red.start_loc, Location::North);
    assert!(motions.blue.turns.is_zero() && motions.red.turns.is_zero());
}

#[test]
fn start_position_skips_stationary_rows_with_turns() {
    let csv = "\
letter,start_pos,end_pos,blue_motion_type,blue_prop_rot_dir,blue_start_loc,blue_end_loc,blue_start_ori,blue_end_ori,blue_turns,red_motion_type,red_prop_rot_dir,red_start_loc,red_end_loc,red_start_ori,red_end_ori,red_turns
Ω,alpha1,alpha1,static,cw,s,s,in,out,0.5,static,cw,n,n,in,out,0.5
α,alpha1,alpha1,static,cw,s,s,in,in,0,static,cw,n,n,in,in,0
";
    let mut d = PictographDataset::new();
    d.insert(
        GridMode::Diamond,
        DatasetTable::from_csv_reader(csv.as_bytes()).unwrap(),
    );
    let r = PictographResolver::new(&d);
    assert_eq!(r.pictographs_for("alpha1_alpha1", GridMode::Diamond).len(), 2);

    let p = r.start_position("alpha1_alpha1", GridMode::Diamond).unwrap();
    assert_eq!(p.letter.as_ref().map(Letter::as_str), Some("α"));
    let motions = p.motions.unwrap();
    assert!(motions.blue.turns.is_zero() && motions.red.turns.is_zero());
}

#[test]
fn start_position_rejects_moving_or_malformed_keys() {
    let d = dataset();
    let r = PictographResolver::new(&d);
    assert!(r.start_position("alpha1_alpha3", GridMode::Diamond).is_none());
    assert!(r.start_position("nonsense", GridMode::Diamond).is_none());
    assert!(r.start_position("alpha1_alpha1", GridMode::Box).is_none());
}

#[test]
fn start_positions_are_stationary_everywhere() {
    let d = dataset();
    let r = PictographResolver::new(&d);
    for key in ["alpha1_alpha1", "alpha3_alpha3", "beta1_beta1", "beta5_beta5"] {
        let p = r.start_position(key, GridMode::Diamond).unwrap();
        assert_eq!(p.start_position, p.end_position, "{key}");
    }
}

#[test]
fn letter_a_is_found_from_motions() {
    let d = dataset();
    let motions = ColorPair::new(
        pro(RotationDirection::Clockwise, Location::South, Location::West, 0),
        pro(RotationDirection::Clockwise, Location::North, Location::East, 0),
    );
    let letter = PictographResolver::new(&d).determine_letter(&motions, GridMode::Diamond);
    assert_eq!(letter.as_ref().map(Letter::as_str), Some("A"));
}

#[test]
fn turns_and_orientation_do_not_change_the_letter() {
    let d = dataset();
    let r = PictographResolver::new(&d);
    let motions = ColorPair::new(
        pro(RotationDirection::Clockwise, Location::South, Location::West, 3)
            .with_start_ori(Orientation::Clock),
        pro(RotationDirection::Clockwise, Location::North, Location::East, 4),
    );
    assert_eq!(
        r.determine_letter(&motions, GridMode::Diamond)
            .as_ref()
            .map(Letter::as_str),
        Some("A")
    );
}

#[test]
fn unknown_motions_have_no_letter() {
    let d = dataset();
    let motions = ColorPair::new(
        pro(RotationDirection::Clockwise, Location::East, Location::South, 0),
        pro(RotationDirection::Clockwise, Location::West, Location::North, 0),
    );
    assert!(
        PictographResolver::new(&d)
            .determine_letter(&motions, GridMode::Diamond)
            .is_none()
    );
}

#[test]
fn ambiguous_rows_resolve_to_the_first() {
    let csv = "\
letter,start_pos,end_pos,blue_motion_type,blue_prop_rot_dir,blue_start_loc,blue_end_loc,red_motion_type,red_prop_rot_dir,red_start_loc,red_end_loc
X,alpha1,alpha3,pro,cw,s,w,pro,cw,n,e
Y,alpha1,alpha3,pro,cw,s,w,pro,cw,n,e
";
    let mut d = PictographDataset::new();
    d.insert(
        GridMode::Diamond,
        DatasetTable::from_csv_reader(csv.as_bytes()).unwrap(),
    );
    let motions = ColorPair::new(
        pro(RotationDirection::Clockwise, Location::South, Location::West, 0),
        pro(RotationDirection::Clockwise, Location::North, Location::East, 0),
    );
    let letter = PictographResolver::new(&d).determine_letter(&motions, GridMode::Diamond);
    assert_eq!(letter.as_ref().map(Letter::as_str), Some("X"));
}

#[test]
fn pictographs_for_lists_rows_in_dataset_order() {
    let d = dataset();
    let letters: Vec<String> = PictographResolver::new(&d)
        .pictographs_for("alpha1_alpha3", GridMode::Diamond)
        .into_iter()
        .filter_map(|p| p.letter.map(String::from))
        .collect();
    assert_eq!(letters, ["A", "B", "C"]);
}

#[test]
fn next_options_carry_orientation_forward() {
    let d = dataset();
    let r = PictographResolver::new(&d);
    let start = r.start_position("alpha1_alpha1", GridMode::Diamond).unwrap();
    let start = start.map_motions(|m| m.with_start_ori(Orientation::Out));

    let options = r.next_options(&start, GridMode::Diamond);
    assert!(!options.is_empty());
    for option in &options {
        assert_eq!(option.start_position, start.end_position);
        let motions = option.motions.unwrap();
        assert_eq!(motions.blue.start_ori, Orientation::Out);
        assert_eq!(motions.red.start_ori, Orientation::Out);
    }
    assert!(
        r.next_options(&PictographData::blank(GridMode::Diamond), GridMode::Diamond)
            .is_empty()
    );
}
