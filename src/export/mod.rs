pub(crate) mod encode;
pub(crate) mod package;
pub(crate) mod rasterize;
