pub(crate) mod grid;
pub(crate) mod text;
pub(crate) mod wrap;
