//! Promo codes
//!
//! Codes are looked up in a fixed registry and only ever evaluated for
//! display. Settlement does not apply them; the code text entered at checkout
//! is kept on the order for reference.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::money::{self, Amount, AmountError};

/// Errors raised by promo code evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    /// The code is not in the registry.
    #[error("promo code {0:?} not found")]
    NotFound(String),

    /// A flat discount is in a different currency from the subtotal (discount, subtotal).
    #[error("discount has currency {0}, but subtotal has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped monetary arithmetic error.
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// What a promo code would take off an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromoDiscount {
    /// Percentage off the subtotal.
    PercentageOff(Percentage),

    /// Fixed amount off the subtotal.
    AmountOff(Amount),
}

/// A registered promo code.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoDescriptor {
    code: String,
    discount: PromoDiscount,
}

impl PromoDescriptor {
    /// Create a descriptor.
    pub fn new(code: impl Into<String>, discount: PromoDiscount) -> Self {
        Self {
            code: code.into(),
            discount,
        }
    }

    /// Normalised code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount the code describes.
    pub fn discount(&self) -> PromoDiscount {
        self.discount
    }

    /// Amount the code would take off `subtotal`, never more than the subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] on overflow or currency mismatch.
    pub fn preview(&self, subtotal: &Amount) -> Result<Amount, PromoError> {
        let off = match self.discount {
            PromoDiscount::PercentageOff(percent) => money::percent_of(subtotal, &percent)?,
            PromoDiscount::AmountOff(amount) => {
                if amount.currency() != subtotal.currency() {
                    return Err(PromoError::CurrencyMismatch(
                        amount.currency().iso_alpha_code,
                        subtotal.currency().iso_alpha_code,
                    ));
                }

                amount
            }
        };

        Ok(Money::from_minor(
            off.to_minor_units().min(subtotal.to_minor_units()).max(0),
            subtotal.currency(),
        ))
    }
}

/// Fixed set of promo codes.
#[derive(Debug, Clone)]
pub struct PromoRegistry {
    codes: Vec<PromoDescriptor>,
}

impl PromoRegistry {
    /// Registry with the given codes. Codes are normalised on insertion.
    pub fn new(codes: impl IntoIterator<Item = PromoDescriptor>) -> Self {
        Self {
            codes: codes
                .into_iter()
                .map(|descriptor| PromoDescriptor {
                    code: normalise(&descriptor.code),
                    ..descriptor
                })
                .collect(),
        }
    }

    /// The storefront's codes: `HORSE10` (10%), `AKZ2024` (500.00 off) and `LOVEHORSE` (15%).
    pub fn standard(currency: &'static Currency) -> Self {
        Self::new([
            PromoDescriptor::new(
                "HORSE10",
                PromoDiscount::PercentageOff(Percentage::from(Decimal::new(10, 2))),
            ),
            PromoDescriptor::new(
                "AKZ2024",
                PromoDiscount::AmountOff(Money::from_minor(50_000, currency)),
            ),
            PromoDescriptor::new(
                "LOVEHORSE",
                PromoDiscount::PercentageOff(Percentage::from(Decimal::new(15, 2))),
            ),
        ])
    }

    /// Look up a code, ignoring surrounding whitespace and case.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::NotFound`] for unknown or blank codes.
    pub fn evaluate(&self, code: &str) -> Result<&PromoDescriptor, PromoError> {
        let code = normalise(code);

        self.codes
            .iter()
            .find(|descriptor| descriptor.code == code)
            .ok_or(PromoError::NotFound(code))
    }
}

fn normalise(code: &str) -> String {
    code.trim().to_uppercase()
}
