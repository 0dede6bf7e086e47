pub(crate) mod motion;
pub(crate) mod orientation;
pub(crate) mod pictograph;
pub(crate) mod position;
pub(crate) mod sequence;
