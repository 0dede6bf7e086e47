use crate::{
    foundation::math::Fnv1a64,
    model::{motion::MotionData, pictograph::PictographData},
};

/// 128-bit identity of everything that affects a pictograph's placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PictographFingerprint {
    pub hi: u64,
    pub lo: u64,
}

/// Metadata is not hashed; it never changes placement.
pub fn fingerprint_pictograph(pictograph: &PictographData) -> PictographFingerprint {
    let mut a = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_u8_pair(&mut a, &mut b, pictograph.grid_mode as u8);
    match &pictograph.letter {
        Some(letter) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_str_pair(&mut a, &mut b, letter.as_str());
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }
    match &pictograph.motions {
        Some(motions) => {
            write_u8_pair(&mut a, &mut b, 1);
            for (_, motion) in motions.iter() {
                write_motion_pair(&mut a, &mut b, motion);
            }
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    PictographFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_motion_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, m: &MotionData) {
    write_u8_pair(a, b, m.motion_type as u8);
    write_u8_pair(a, b, m.prop_rot_dir as u8);
    write_u8_pair(a, b, m.start_loc.index());
    write_u8_pair(a, b, m.end_loc.index());
    write_u32_pair(a, b, m.turns.halves());
    write_u8_pair(a, b, m.start_ori as u8);
    write_u8_pair(a, b, m.end_ori as u8);
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u32_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u32) {
    a.write_u32(v);
    b.write_u32(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    a.write_str(s);
    b.write_str(s);
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/fingerprint.rs"]
mod tests;
