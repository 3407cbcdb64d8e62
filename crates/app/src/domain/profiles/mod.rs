//! Customer profiles

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProfilesServiceError;
pub use service::*;
