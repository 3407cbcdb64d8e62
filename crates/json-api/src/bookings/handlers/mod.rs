//! Booking Handlers

pub(crate) mod availability;
pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod quote;
pub(crate) mod stats;
