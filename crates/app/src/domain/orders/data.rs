//! Order Data

use paddock::{
    delivery::DeliveryMethod,
    orders::{ContactDetails, PaymentMethod},
};

/// Everything the customer supplies at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub contact: ContactDetails,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    /// Stored for reference only.
    pub promo_code: Option<String>,
    pub notes: Option<String>,
}

impl CheckoutRequest {
    /// Promo code without surrounding whitespace, if one was entered.
    pub(crate) fn promo_code(&self) -> Option<String> {
        non_blank(self.promo_code.as_deref())
    }

    pub(crate) fn notes(&self) -> Option<String> {
        non_blank(self.notes.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
