//! Catalog Handlers

pub(crate) mod horses;
pub(crate) mod items;
