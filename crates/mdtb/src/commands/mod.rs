//! CLI command implementations.

pub(crate) mod images;
pub(crate) mod render;

pub(crate) use render::RenderArgs;
