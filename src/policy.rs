//! Pricing policy
//!
//! Storefront-wide rules for subscription discounts, delivery fees and the
//! assembly charge. Every rule is a pure function of a subtotal and the
//! caller's subscription snapshot.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::warn;

use crate::{
    delivery::DeliveryMethod,
    money::{self, Amount, AmountError},
    subscriptions::{Subscription, Tier},
};

/// Storefront pricing rules.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    currency: &'static Currency,
    premium_discount: Percentage,
    pro_discount: Percentage,
    free_delivery_threshold: Amount,
    post_fee: Amount,
    courier_fee: Amount,
    assembly_rate: Percentage,
    assembly_floor: Amount,
}

impl PricingPolicy {
    /// The storefront's standard rules: 10% premium and 20% pro discounts,
    /// free delivery for subscribers from 2000.00, post 300.00, courier
    /// 500.00, assembly 5% with a 100.00 floor.
    pub fn standard(currency: &'static Currency) -> Self {
        Self {
            currency,
            premium_discount: Percentage::from(Decimal::new(10, 2)),
            pro_discount: Percentage::from(Decimal::new(20, 2)),
            free_delivery_threshold: Money::from_minor(200_000, currency),
            post_fee: Money::from_minor(30_000, currency),
            courier_fee: Money::from_minor(50_000, currency),
            assembly_rate: Percentage::from(Decimal::new(5, 2)),
            assembly_floor: Money::from_minor(10_000, currency),
        }
    }

    /// Replace the assembly rate and floor.
    #[must_use]
    pub fn with_assembly(mut self, rate: Percentage, floor: Amount) -> Self {
        self.assembly_rate = rate;
        self.assembly_floor = floor;
        self
    }

    /// Replace the delivery fees and the subscriber free-delivery threshold.
    #[must_use]
    pub fn with_delivery(mut self, post: Amount, courier: Amount, free_from: Amount) -> Self {
        self.post_fee = post;
        self.courier_fee = courier;
        self.free_delivery_threshold = free_from;
        self
    }

    /// Currency the policy amounts are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Discount rate for a subscription; zero unless it is active.
    pub fn discount_rate(&self, subscription: Subscription) -> Percentage {
        match subscription.effective_tier() {
            Tier::Pro => self.pro_discount,
            Tier::Premium => self.premium_discount,
            Tier::Free => Percentage::from(Decimal::ZERO),
        }
    }

    /// Subscription discount on a subtotal, rounded to whole minor units.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::PercentConversion`] if the calculation overflows.
    pub fn discount(
        &self,
        subtotal: &Amount,
        subscription: Subscription,
    ) -> Result<Amount, AmountError> {
        if !subscription.has_benefits() {
            return Ok(money::zero(subtotal.currency()));
        }

        money::percent_of(subtotal, &self.discount_rate(subscription))
    }

    /// Delivery fee for an order of the given subtotal.
    pub fn delivery_cost(
        &self,
        subtotal: &Amount,
        method: DeliveryMethod,
        subscription: Subscription,
    ) -> Amount {
        if method == DeliveryMethod::Pickup {
            return money::zero(subtotal.currency());
        }

        if subscription.has_benefits()
            && subtotal.to_minor_units() >= self.free_delivery_threshold.to_minor_units()
        {
            return money::zero(subtotal.currency());
        }

        match method {
            DeliveryMethod::Post => self.post_fee,
            DeliveryMethod::Courier | DeliveryMethod::Pickup => self.courier_fee,
        }
    }

    /// Assembly charge: the assembly rate of the subtotal, never below the floor.
    ///
    /// When the percentage cannot be computed the floor is charged instead and a
    /// `computation_fallback` warning is logged.
    pub fn assembly_cost(&self, subtotal: &Amount) -> Amount {
        match money::percent_of(subtotal, &self.assembly_rate) {
            Ok(charge) => money::max(charge, self.assembly_floor),
            Err(error) => self.assembly_fallback(&error),
        }
    }

    /// Charge used when the assembly percentage cannot be computed.
    pub(crate) fn assembly_fallback(&self, error: &AmountError) -> Amount {
        warn!(
            kind = "computation_fallback",
            error = %error,
            fallback_minor = self.assembly_floor.to_minor_units(),
            "assembly cost could not be computed, charging the floor"
        );

        self.assembly_floor
    }

    /// Floor charged for assembly.
    pub fn assembly_floor(&self) -> Amount {
        self.assembly_floor
    }

    /// Subtotal − discount + delivery + assembly, never below zero.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] on currency mismatch or overflow.
    pub fn grand_total(
        &self,
        subtotal: Amount,
        discount: Amount,
        delivery: Amount,
        assembly: Amount,
    ) -> Result<Amount, AmountError> {
        let total = subtotal.sub(discount)?.add(delivery)?.add(assembly)?;

        Ok(money::non_negative(total))
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use rusty_money::iso::RUB;
    use testresult::TestResult;

    use super::*;

    fn rub(minor: i64) -> Amount {
        Money::from_minor(minor, RUB)
    }

    #[test]
    fn discount_rates_by_tier_and_subtotal() -> TestResult {
        let policy = PricingPolicy::standard(RUB);

        let cases = [
            (Subscription::active(Tier::Pro), 0, 0),
            (Subscription::active(Tier::Pro), 99_999, 20_000),
            (Subscription::active(Tier::Pro), 200_000, 40_000),
            (Subscription::active(Tier::Pro), 5_000_000, 1_000_000),
            (Subscription::active(Tier::Premium), 0, 0),
            (Subscription::active(Tier::Premium), 99_999, 10_000),
            (Subscription::active(Tier::Premium), 200_000, 20_000),
            (Subscription::active(Tier::Premium), 5_000_000, 500_000),
            (Subscription::free(), 99_999, 0),
            (Subscription::free(), 5_000_000, 0),
            (Subscription::new(Tier::Pro, false), 200_000, 0),
            (Subscription::new(Tier::Premium, false), 5_000_000, 0),
        ];

        for (subscription, subtotal, expected) in cases {
            assert_eq!(
                policy.discount(&rub(subtotal), subscription)?,
                rub(expected),
                "{subscription:?} on {subtotal}"
            );
        }

        Ok(())
    }

    #[test]
    fn pickup_is_always_free() {
        let policy = PricingPolicy::standard(RUB);

        for subscription in [
            Subscription::free(),
            Subscription::active(Tier::Premium),
            Subscription::active(Tier::Pro),
        ] {
            for subtotal in [0, 100, 199_999, 200_000, 10_000_000] {
                assert_eq!(
                    policy.delivery_cost(&rub(subtotal), DeliveryMethod::Pickup, subscription),
                    rub(0),
                    "pickup for {subscription:?} at {subtotal}"
                );
            }
        }
    }

    #[test]
    fn subscribers_get_free_delivery_from_threshold() {
        let policy = PricingPolicy::standard(RUB);
        let pro = Subscription::active(Tier::Pro);

        assert_eq!(
            policy.delivery_cost(&rub(200_000), DeliveryMethod::Courier, pro),
            rub(0)
        );
        assert_eq!(
            policy.delivery_cost(&rub(199_999), DeliveryMethod::Courier, pro),
            rub(50_000)
        );
        assert_eq!(
            policy.delivery_cost(&rub(200_000), DeliveryMethod::Post, Subscription::active(Tier::Premium)),
            rub(0)
        );
    }

    #[test]
    fn free_users_pay_the_fee_table() {
        let policy = PricingPolicy::standard(RUB);
        let free = Subscription::free();

        assert_eq!(
            policy.delivery_cost(&rub(1_000_000), DeliveryMethod::Post, free),
            rub(30_000)
        );
        assert_eq!(
            policy.delivery_cost(&rub(1_000_000), DeliveryMethod::Courier, free),
            rub(50_000)
        );
        assert_eq!(
            policy.delivery_cost(&rub(1_000_000), DeliveryMethod::Courier, Subscription::new(Tier::Pro, false)),
            rub(50_000)
        );
    }

    #[test]
    fn assembly_cost_has_a_floor() {
        let policy = PricingPolicy::standard(RUB);

        assert_eq!(policy.assembly_cost(&rub(0)), rub(10_000));
        assert_eq!(policy.assembly_cost(&rub(199_999)), rub(10_000));
        assert_eq!(policy.assembly_cost(&rub(200_000)), rub(10_000));
        assert_eq!(policy.assembly_cost(&rub(1_000_000)), rub(50_000));
    }

    #[test]
    fn assembly_cost_falls_back_to_floor_on_overflow() -> TestResult {
        let policy = PricingPolicy::standard(RUB)
            .with_assembly(Percentage::try_from("100000000000000000000")?, rub(10_000));

        assert_eq!(policy.assembly_cost(&rub(i64::MAX)), rub(10_000));

        Ok(())
    }

    #[test]
    fn grand_total_is_clamped_at_zero() -> TestResult {
        let policy = PricingPolicy::standard(RUB);

        let total = policy.grand_total(rub(100), rub(500), rub(0), rub(0))?;

        assert_eq!(total, rub(0));

        Ok(())
    }

    #[test]
    fn grand_total_sums_components() -> TestResult {
        let policy = PricingPolicy::standard(RUB);

        let total = policy.grand_total(rub(300_000), rub(60_000), rub(0), rub(15_000))?;

        assert_eq!(total, rub(255_000));

        Ok(())
    }
}
