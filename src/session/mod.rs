pub(crate) mod document;
pub(crate) mod page_session;
