//! Paddock Domain Concerns

pub mod bookings;
pub mod carts;
pub mod catalog;
pub mod orders;
pub mod profiles;
