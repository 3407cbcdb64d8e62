//! Delivery methods

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown delivery method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown delivery method: {0}")]
pub struct UnknownDeliveryMethod(pub String);

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Courier to the door.
    #[default]
    Courier,

    /// Collected by the customer.
    Pickup,

    /// Sent by post.
    Post,
}

impl DeliveryMethod {
    /// Stored name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryMethod::Courier => "courier",
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Post => "post",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = UnknownDeliveryMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "courier" => Ok(DeliveryMethod::Courier),
            "pickup" => Ok(DeliveryMethod::Pickup),
            "post" => Ok(DeliveryMethod::Post),
            other => Err(UnknownDeliveryMethod(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_default() {
        assert_eq!(DeliveryMethod::default(), DeliveryMethod::Courier);
    }

    #[test]
    fn parses_stored_names() {
        assert_eq!("post".parse(), Ok(DeliveryMethod::Post));
        assert_eq!("pickup".parse(), Ok(DeliveryMethod::Pickup));
        assert_eq!(
            "drone".parse::<DeliveryMethod>(),
            Err(UnknownDeliveryMethod("drone".to_string()))
        );
    }
}
