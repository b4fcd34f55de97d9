pub(crate) mod bitstream;
pub(crate) mod interpret;
pub(crate) mod page;
pub(crate) mod payload;
