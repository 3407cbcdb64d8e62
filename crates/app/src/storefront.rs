//! Storefront settings shared by the services.

use std::sync::Arc;

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use paddock::{policy::PricingPolicy, promotions::PromoRegistry};
use rusty_money::iso::{self, Currency};

/// Prefix of generated order numbers.
pub const DEFAULT_ORDER_NUMBER_PREFIX: &str = "AKZ";

/// Pricing policy, promo codes and locale of the store.
#[derive(Debug, Clone)]
pub struct Storefront {
    currency: &'static Currency,
    policy: PricingPolicy,
    promotions: Arc<PromoRegistry>,
    order_number_prefix: String,
    time_zone: TimeZone,
}

impl Storefront {
    /// Storefront with the standard policy and promo codes for `currency`.
    #[must_use]
    pub fn new(
        currency: &'static Currency,
        order_number_prefix: impl Into<String>,
        time_zone: TimeZone,
    ) -> Self {
        Self {
            currency,
            policy: PricingPolicy::standard(currency),
            promotions: Arc::new(PromoRegistry::standard(currency)),
            order_number_prefix: order_number_prefix.into(),
            time_zone,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    #[must_use]
    pub fn promotions(&self) -> &PromoRegistry {
        &self.promotions
    }

    #[must_use]
    pub fn order_number_prefix(&self) -> &str {
        &self.order_number_prefix
    }

    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Business-local calendar date of `at`.
    #[must_use]
    pub fn local_date(&self, at: Timestamp) -> Date {
        at.to_zoned(self.time_zone.clone()).date()
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(iso::RUB, DEFAULT_ORDER_NUMBER_PREFIX, TimeZone::UTC)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn local_date_uses_business_time_zone() -> TestResult {
        let storefront = Storefront::new(
            iso::RUB,
            "AKZ",
            TimeZone::fixed(jiff::tz::offset(3)),
        );

        let late_evening_utc: Timestamp = "2024-03-09T22:30:00Z".parse()?;

        assert_eq!(storefront.local_date(late_evening_utc), date(2024, 3, 10));

        Ok(())
    }
}
