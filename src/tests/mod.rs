mod resources;
pub(crate) mod support;
