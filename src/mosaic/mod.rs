pub(crate) mod cell;
pub(crate) mod draw;
pub(crate) mod layers;
pub(crate) mod overlay;
pub(crate) mod text;
