//! Pricing

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    money::Amount,
    subscriptions::{Subscription, Tier},
};

/// Errors raised when assembling tier prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A tier price is in a different currency from the base price (tier, found, expected).
    #[error("{0} price has currency {1}, but base price has currency {2}")]
    CurrencyMismatch(Tier, &'static str, &'static str),
}

/// Base, premium and pro prices for one sellable thing.
///
/// Used for catalog unit prices and for hourly horse rates alike. The usual
/// ordering `pro <= premium <= base` is not enforced; each tier price is
/// returned exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierPrices {
    base: Amount,
    premium: Amount,
    pro: Amount,
}

impl TierPrices {
    /// Create tier prices, all in the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::CurrencyMismatch`] if the premium or pro price
    /// is not in the base price currency.
    pub fn new(base: Amount, premium: Amount, pro: Amount) -> Result<Self, PricingError> {
        let currency = base.currency();

        for (tier, price) in [(Tier::Premium, &premium), (Tier::Pro, &pro)] {
            if price.currency() != currency {
                return Err(PricingError::CurrencyMismatch(
                    tier,
                    price.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }

        Ok(Self { base, premium, pro })
    }

    /// Price without any subscription.
    pub fn base(&self) -> Amount {
        self.base
    }

    /// Price for active premium subscribers.
    pub fn premium(&self) -> Amount {
        self.premium
    }

    /// Price for active pro subscribers.
    pub fn pro(&self) -> Amount {
        self.pro
    }

    /// Currency of all three prices.
    pub fn currency(&self) -> &'static Currency {
        self.base.currency()
    }

    /// Price for a tier, ignoring activity.
    pub fn for_tier(&self, tier: Tier) -> Amount {
        match tier {
            Tier::Free => self.base,
            Tier::Premium => self.premium,
            Tier::Pro => self.pro,
        }
    }
}

/// Resolve the price a user pays given their subscription snapshot.
///
/// Pro price for an active pro subscription, premium price for an active
/// premium subscription, otherwise the base price.
pub fn resolve_price(prices: &TierPrices, subscription: Subscription) -> Amount {
    prices.for_tier(subscription.effective_tier())
}
