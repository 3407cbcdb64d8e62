//! Paddock prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bookings::{
        BookingError, BookingPrice, BookingStats, BookingStatus, CANCELLATION_NOTICE,
        booking_number, ensure_cancellable, price_booking,
    },
    cart::{Cart, CartBreakdown, CartError, CartLine, QuantityChange},
    delivery::DeliveryMethod,
    money::{Amount, AmountError},
    orders::{ContactDetails, OrderError, OrderNumber, OrderStatus, PaymentMethod},
    policy::PricingPolicy,
    pricing::{PricingError, TierPrices, resolve_price},
    promotions::{PromoDescriptor, PromoDiscount, PromoError, PromoRegistry},
    settlement::{SettledLine, Settlement, SettlementError, settle},
    subscriptions::{Subscription, Tier},
};
