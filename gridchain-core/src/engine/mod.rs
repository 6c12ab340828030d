pub(crate) mod alignment;
pub(crate) mod level;
pub(crate) mod resolver;
