//! Paddock
//!
//! Paddock is the pricing, cart, settlement and booking engine behind an
//! equestrian storefront: tiered subscription prices for feed, cart totals,
//! checkout snapshots and hourly horse rentals.

pub mod bookings;
pub mod cart;
pub mod delivery;
pub mod money;
pub mod orders;
pub mod policy;
pub mod prelude;
pub mod pricing;
pub mod promotions;
pub mod schedule;
pub mod settlement;
pub mod subscriptions;
