//! Cart

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    delivery::DeliveryMethod,
    money::{self, Amount, AmountError},
    policy::PricingPolicy,
    subscriptions::Subscription,
};

/// Errors related to cart mutation and totals.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities added to a cart must be at least one.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// No line with the given UUID exists in the cart.
    #[error("cart line {0} not found")]
    LineNotFound(Uuid),

    /// A line price is in a different currency from the cart (line, line currency, cart currency).
    #[error("line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(Uuid, &'static str, &'static str),

    /// Wrapped monetary arithmetic error.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// One item in a cart with the unit price captured when it was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartLine {
    uuid: Uuid,
    item: Uuid,
    quantity: u32,
    price_at_addition: Amount,
}

impl CartLine {
    /// Create a cart line.
    pub fn new(uuid: Uuid, item: Uuid, quantity: u32, price_at_addition: Amount) -> Self {
        Self {
            uuid,
            item,
            quantity,
            price_at_addition,
        }
    }

    /// Line UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Catalog item UUID.
    pub fn item(&self) -> Uuid {
        self.item
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Snapshot unit price.
    pub fn price_at_addition(&self) -> Amount {
        self.price_at_addition
    }

    /// `price_at_addition × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the product does not fit in minor units.
    pub fn total(&self) -> Result<Amount, AmountError> {
        money::times(&self.price_at_addition, self.quantity)
    }
}

/// Result of changing a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityChange {
    /// The line now has the given quantity.
    Updated(CartLine),

    /// A quantity of zero or less removed the line.
    Removed(CartLine),
}

/// Derived cart totals for display and settlement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartBreakdown {
    /// Number of distinct lines.
    pub item_count: usize,

    /// Sum of all line quantities.
    pub total_quantity: u64,

    /// Σ `price_at_addition × quantity`.
    pub subtotal: Amount,

    /// Subscription discount.
    pub discount: Amount,

    /// Discount rate in percentage points.
    pub discount_percent: Decimal,

    /// Method the delivery cost was computed for.
    pub delivery_method: DeliveryMethod,

    /// Delivery fee.
    pub delivery_cost: Amount,

    /// Assembly charge.
    pub assembly_cost: Amount,

    /// Grand total, never negative.
    pub total: Amount,
}

/// A user's cart.
///
/// Derived values such as the subtotal are computed on demand from the lines
/// and never stored.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart from existing lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if a line is priced in another currency.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines
            .iter()
            .try_for_each(|line| Self::check_currency(line.uuid, &line.price_at_addition, currency))?;

        Ok(Self { lines, currency })
    }

    fn check_currency(
        line: Uuid,
        price: &Amount,
        currency: &'static Currency,
    ) -> Result<(), CartError> {
        if price.currency() == currency {
            Ok(())
        } else {
            Err(CartError::CurrencyMismatch(
                line,
                price.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ))
        }
    }

    /// Add an item at its currently resolved price.
    ///
    /// If the item already has a line, the quantity is incremented and the whole
    /// line is repriced at `resolved_price`. Otherwise a new line is created.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity, or
    /// [`CartError::CurrencyMismatch`] for a price in another currency.
    pub fn add_item(
        &mut self,
        item: Uuid,
        quantity: u32,
        resolved_price: Amount,
    ) -> Result<CartLine, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item == item) {
            Self::check_currency(line.uuid, &resolved_price, self.currency)?;

            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(AmountError::Overflow)?;
            line.price_at_addition = resolved_price;

            return Ok(*line);
        }

        let line = CartLine::new(Uuid::now_v7(), item, quantity, resolved_price);

        Self::check_currency(line.uuid, &resolved_price, self.currency)?;

        self.lines.push(line);

        Ok(line)
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in this cart.
    pub fn update_quantity(&mut self, line: Uuid, quantity: i64) -> Result<QuantityChange, CartError> {
        if quantity <= 0 {
            return self.remove_item(line).map(QuantityChange::Removed);
        }

        let quantity = u32::try_from(quantity).map_err(|_err| CartError::InvalidQuantity(quantity))?;

        let existing = self
            .lines
            .iter_mut()
            .find(|existing| existing.uuid == line)
            .ok_or(CartError::LineNotFound(line))?;

        existing.quantity = quantity;

        Ok(QuantityChange::Updated(*existing))
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in this cart.
    pub fn remove_item(&mut self, line: Uuid) -> Result<CartLine, CartError> {
        let position = self
            .lines
            .iter()
            .position(|existing| existing.uuid == line)
            .ok_or(CartError::LineNotFound(line))?;

        Ok(self.lines.remove(position))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Reprice every line whose item still resolves to a price.
    ///
    /// Returns the number of lines whose snapshot changed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if a resolved price is in another currency.
    pub fn refresh_prices<F>(&mut self, mut resolve: F) -> Result<usize, CartError>
    where
        F: FnMut(Uuid) -> Option<Amount>,
    {
        let mut repriced = 0;

        for line in &mut self.lines {
            let Some(price) = resolve(line.item) else {
                continue;
            };

            Self::check_currency(line.uuid, &price, self.currency)?;

            if price != line.price_at_addition {
                line.price_at_addition = price;
                repriced += 1;
            }
        }

        Ok(repriced)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by UUID.
    pub fn line(&self, line: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|existing| existing.uuid == line)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Σ `price_at_addition × quantity`.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] on overflow.
    pub fn subtotal(&self) -> Result<Amount, AmountError> {
        self.lines
            .iter()
            .try_fold(money::zero(self.currency), |acc, line| {
                Ok(acc.add(line.total()?)?)
            })
    }

    /// Subscription discount on the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal or percentage overflows.
    pub fn discount(
        &self,
        policy: &PricingPolicy,
        subscription: Subscription,
    ) -> Result<Amount, CartError> {
        Ok(policy.discount(&self.subtotal()?, subscription)?)
    }

    /// Delivery fee for the chosen method.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the subtotal overflows.
    pub fn delivery_cost(
        &self,
        policy: &PricingPolicy,
        method: DeliveryMethod,
        subscription: Subscription,
    ) -> Result<Amount, CartError> {
        Ok(policy.delivery_cost(&self.subtotal()?, method, subscription))
    }

    /// Assembly charge. Never fails: any computation error charges the floor.
    pub fn assembly_cost(&self, policy: &PricingPolicy) -> Amount {
        match self.subtotal() {
            Ok(subtotal) => policy.assembly_cost(&subtotal),
            Err(error) => policy.assembly_fallback(&error),
        }
    }

    /// Subtotal − discount + delivery + assembly, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] on overflow.
    pub fn grand_total(
        &self,
        policy: &PricingPolicy,
        method: DeliveryMethod,
        subscription: Subscription,
    ) -> Result<Amount, CartError> {
        Ok(self.breakdown(policy, method, subscription)?.total)
    }

    /// Every derived value as plain data.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] on overflow.
    pub fn breakdown(
        &self,
        policy: &PricingPolicy,
        method: DeliveryMethod,
        subscription: Subscription,
    ) -> Result<CartBreakdown, CartError> {
        let subtotal = self.subtotal()?;
        let discount = policy.discount(&subtotal, subscription)?;
        let delivery_cost = policy.delivery_cost(&subtotal, method, subscription);
        let assembly_cost = policy.assembly_cost(&subtotal);
        let total = policy.grand_total(subtotal, discount, delivery_cost, assembly_cost)?;

        let rate = policy.discount_rate(subscription);

        Ok(CartBreakdown {
            item_count: self.len(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            discount_percent: money::percent_points(&rate).normalize(),
            delivery_method: method,
            delivery_cost,
            assembly_cost,
            total,
        })
    }
}
