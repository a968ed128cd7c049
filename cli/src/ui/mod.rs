pub(crate) mod render;
pub(crate) mod spinner;
pub(crate) mod subject;
