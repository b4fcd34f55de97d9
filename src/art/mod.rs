pub(crate) mod block;
pub(crate) mod library;
pub(crate) mod text;
