pub(crate) mod adjustment;
pub(crate) mod location;
pub(crate) mod placement;
pub(crate) mod rotation;
