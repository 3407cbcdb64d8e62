//! Persistence and services for the paddock storefront.

pub mod context;
pub mod database;
pub mod domain;
pub mod storefront;

#[cfg(test)]
mod test;

mod columns;
mod uuids;

pub use uuids::TypedUuid;
