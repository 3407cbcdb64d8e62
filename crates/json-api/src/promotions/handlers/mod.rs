//! Promo Code Handlers

pub(crate) mod evaluate;
