//! Promo code handlers

mod handlers;

pub(crate) use handlers::*;
