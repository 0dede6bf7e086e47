//! End-orientation rules.
//!
//! A prop's orientation after a beat depends on the motion type, the number of turns
//! and (for half turns and floats) the spin or handpath direction.

use crate::model::motion::{Handpath, MotionData, MotionType, Orientation, RotationDirection};

/// Orientation of the prop at the end of `motion`.
pub fn end_orientation(motion: &MotionData) -> Orientation {
    if motion.motion_type == MotionType::Float {
        return float_end_orientation(motion.start_ori, motion.handpath());
    }
    if motion.turns.is_whole() {
        whole_turn_orientation(motion.motion_type, motion.turns.halves() / 2, motion.start_ori)
    } else {
        half_turn_orientation(
            motion.motion_type,
            motion.turns.halves(),
            motion.start_ori,
            motion.prop_rot_dir,
        )
    }
}

fn whole_turn_orientation(motion_type: MotionType, whole: u32, start: Orientation) -> Orientation {
    let even = whole % 2 == 0;
    match motion_type {
        MotionType::Pro | MotionType::Static | MotionType::Float => {
            if even {
                start
            } else {
                start.switched()
            }
        }
        MotionType::Anti | MotionType::Dash => {
            if even {
                start.switched()
            } else {
                start
            }
        }
    }
}

fn half_turn_orientation(
    motion_type: MotionType,
    halves: u32,
    start: Orientation,
    dir: RotationDirection,
) -> Orientation {
    use Orientation::{Clock, Counter, In, Out};
    use RotationDirection::{Clockwise, CounterClockwise, NoRotation};

    // 0.5, 2.5, ... land on the "first" entry; 1.5, 3.5, ... on the second.
    let first = halves % 4 == 1;
    let pick = |a: Orientation, b: Orientation| if first { a } else { b };
    let antispin = matches!(motion_type, MotionType::Anti | MotionType::Dash);

    match (start, dir, antispin) {
        (_, NoRotation, _) => start,
        (In, Clockwise, true) => pick(Clock, Counter),
        (In, CounterClockwise, true) => pick(Counter, Clock),
        (Out, Clockwise, true) => pick(Counter, Clock),
        (Out, CounterClockwise, true) => pick(Clock, Counter),
        (Clock, Clockwise, true) => pick(Out, In),
        (Clock, CounterClockwise, true) => pick(In, Out),
        (Counter, Clockwise, true) => pick(In, Out),
        (Counter, CounterClockwise, true) => pick(Out, In),
        (In, Clockwise, false) => pick(Counter, Clock),
        (In, CounterClockwise, false) => pick(Clock, Counter),
        (Out, Clockwise, false) => pick(Clock, Counter),
        (Out, CounterClockwise, false) => pick(Counter, Clock),
        (Clock, Clockwise, false) => pick(In, Out),
        (Clock, CounterClockwise, false) => pick(Out, In),
        (Counter, Clockwise, false) => pick(Out, In),
        (Counter, CounterClockwise, false) => pick(In, Out),
    }
}

fn float_end_orientation(start: Orientation, handpath: Option<Handpath>) -> Orientation {
    use Orientation::{Clock, Counter, In, Out};

    match (handpath, start) {
        (Some(Handpath::Clockwise), In) => Counter,
        (Some(Handpath::Clockwise), Out) => Clock,
        (Some(Handpath::Clockwise), Clock) => In,
        (Some(Handpath::Clockwise), Counter) => Out,
        (Some(Handpath::CounterClockwise), In) => Clock,
        (Some(Handpath::CounterClockwise), Out) => Counter,
        (Some(Handpath::CounterClockwise), Clock) => Out,
        (Some(Handpath::CounterClockwise), Counter) => In,
        _ => start,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/orientation.rs"]
mod tests;
