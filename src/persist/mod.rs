pub(crate) mod sequence_json;
