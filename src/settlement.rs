//! Settlement
//!
//! Converts a cart into the monetary snapshot stored on an order. The same
//! policy functions back the cart preview, so a preview and the settled order
//! always agree for the same lines and subscription.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::{Cart, CartError},
    delivery::DeliveryMethod,
    money::Amount,
    policy::PricingPolicy,
    subscriptions::{Subscription, Tier},
};

/// Errors raised while settling a cart.
#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    /// There is nothing to settle.
    #[error("cart is empty")]
    EmptyCart,

    /// Wrapped cart error.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// An order line frozen from a cart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettledLine {
    /// Catalog item UUID.
    pub item: Uuid,
    /// Quantity.
    pub quantity: u32,
    /// Unit price taken from `price_at_addition`.
    pub unit_price: Amount,
}

/// Monetary snapshot of a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    /// Lines in cart order.
    pub lines: Vec<SettledLine>,
    /// Σ line totals.
    pub subtotal: Amount,
    /// Subscription discount.
    pub discount: Amount,
    /// Chosen delivery method.
    pub delivery_method: DeliveryMethod,
    /// Delivery fee.
    pub delivery_cost: Amount,
    /// Assembly charge.
    pub assembly_cost: Amount,
    /// Grand total.
    pub total: Amount,
    /// Tier whose discount was applied, if any.
    pub subscription_applied: Option<Tier>,
}

impl Settlement {
    /// Savings from the subscription; equal to the discount.
    pub fn subscription_savings(&self) -> Amount {
        self.discount
    }
}

/// Settle a cart for the given subscription snapshot and delivery method.
///
/// # Errors
///
/// Returns [`SettlementError::EmptyCart`] for a cart with no lines, or a
/// wrapped error if any total cannot be computed.
pub fn settle(
    cart: &Cart,
    policy: &PricingPolicy,
    subscription: Subscription,
    delivery_method: DeliveryMethod,
) -> Result<Settlement, SettlementError> {
    if cart.is_empty() {
        return Err(SettlementError::EmptyCart);
    }

    let breakdown = cart.breakdown(policy, delivery_method, subscription)?;

    let lines = cart
        .lines()
        .iter()
        .map(|line| SettledLine {
            item: line.item(),
            quantity: line.quantity(),
            unit_price: line.price_at_addition(),
        })
        .collect();

    Ok(Settlement {
        lines,
        subtotal: breakdown.subtotal,
        discount: breakdown.discount,
        delivery_method,
        delivery_cost: breakdown.delivery_cost,
        assembly_cost: breakdown.assembly_cost,
        total: breakdown.total,
        subscription_applied: subscription
            .has_benefits()
            .then(|| subscription.effective_tier()),
    })
}
