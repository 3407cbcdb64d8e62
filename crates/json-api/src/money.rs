//! Monetary response fields

use paddock::money::Amount;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// An amount as decimal text plus exact minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MoneyResponse {
    /// Decimal amount, e.g. `"254.00"`
    pub amount: String,

    /// Amount in minor units (kopecks, cents)
    pub minor_units: i64,

    /// ISO 4217 code
    pub currency: String,
}

impl From<&Amount> for MoneyResponse {
    fn from(amount: &Amount) -> Self {
        Self {
            amount: amount.amount().to_string(),
            minor_units: amount.to_minor_units(),
            currency: amount.currency().iso_alpha_code.to_string(),
        }
    }
}

impl From<Amount> for MoneyResponse {
    fn from(amount: Amount) -> Self {
        Self::from(&amount)
    }
}
