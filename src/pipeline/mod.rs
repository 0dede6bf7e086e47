pub(crate) mod batch;
pub(crate) mod cache;
pub(crate) mod context;
pub(crate) mod fingerprint;
