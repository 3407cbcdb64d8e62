//! Booking Schedule

mod handlers;

pub(crate) use handlers::*;
