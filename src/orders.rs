//! Orders

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or moving orders.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// A required contact field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The requested status change is not allowed.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// A stored enum value was not recognised (kind, value).
    #[error("unknown {0}: {1}")]
    UnknownValue(&'static str, String),
}

/// Order lifecycle.
///
/// `pending → confirmed → in_progress → shipped → delivered`, with
/// `cancelled` reachable from any non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by the store.
    Confirmed,
    /// Being assembled.
    InProgress,
    /// Handed to delivery.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Stored name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the order may move from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self, next) {
            (current, OrderStatus::Cancelled) => !current.is_terminal(),
            (OrderStatus::Pending, OrderStatus::Confirmed)
            | (OrderStatus::Confirmed, OrderStatus::InProgress)
            | (OrderStatus::InProgress, OrderStatus::Shipped)
            | (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            _ => false,
        }
    }

    /// Check a transition.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] when `next` is not reachable.
    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(OrderError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "in_progress" => Ok(OrderStatus::InProgress),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::UnknownValue("order status", other.to_string())),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank card.
    #[default]
    Card,
    /// Faster payments system.
    Sbp,
    /// Apple Pay.
    #[serde(rename = "applepay")]
    ApplePay,
    /// Google Pay.
    #[serde(rename = "googlepay")]
    GooglePay,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethod {
    /// Stored name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Sbp => "sbp",
            PaymentMethod::ApplePay => "applepay",
            PaymentMethod::GooglePay => "googlepay",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "sbp" => Ok(PaymentMethod::Sbp),
            "applepay" => Ok(PaymentMethod::ApplePay),
            "googlepay" => Ok(PaymentMethod::GooglePay),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(OrderError::UnknownValue("payment method", other.to_string())),
        }
    }
}

/// Human-facing order number, `PREFIX-YYYYMMDD-XXXXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a number for `date` with six random uppercase hex digits.
    pub fn generate<R: Rng>(prefix: &str, date: Date, rng: &mut R) -> Self {
        let suffix: u32 = rng.gen_range(0..=0x00FF_FFFF);

        Self(format!("{prefix}-{}-{suffix:06X}", date.strftime("%Y%m%d")))
    }

    /// Wrap a stored number.
    pub fn from_string(number: String) -> Self {
        Self(number)
    }

    /// Number text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer contact and delivery address captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Customer name.
    pub name: String,
    /// Customer phone.
    pub phone: String,
    /// Customer email.
    pub email: Option<String>,
    /// Delivery city.
    pub city: String,
    /// Delivery street.
    pub street: String,
    /// Delivery house.
    pub house: String,
    /// Delivery apartment.
    pub apartment: Option<String>,
    /// Postal index.
    pub postal_index: Option<String>,
}

impl ContactDetails {
    /// Check that name, phone, city, street and house are present.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), OrderError> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("city", &self.city),
            ("street", &self.street),
            ("house", &self.house),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |(field, _)| Err(OrderError::MissingField(field)))
    }
}
