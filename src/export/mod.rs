pub(crate) mod png;
pub(crate) mod share;
pub(crate) mod sink;
pub(crate) mod targets;
