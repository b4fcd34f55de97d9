pub(crate) mod build;
pub(crate) mod cell;
pub(crate) mod clock;
pub(crate) mod grid;
pub(crate) mod template;
pub(crate) mod wrap;
