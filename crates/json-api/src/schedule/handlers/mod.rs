//! Schedule Handlers

pub(crate) mod dates;
pub(crate) mod times;
