pub(crate) mod frame;
pub(crate) mod fx;
pub(crate) mod glyph;
pub(crate) mod raster;
