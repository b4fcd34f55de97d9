pub(crate) mod fill;
pub(crate) mod fine;
pub(crate) mod geometry;
