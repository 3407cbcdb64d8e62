//! Storefront Config

use clap::Args;
use jiff::tz::TimeZone;
use thiserror::Error;

use paddock::money;
use paddock_app::storefront::{DEFAULT_ORDER_NUMBER_PREFIX, Storefront};

#[derive(Debug, Error)]
pub(crate) enum StorefrontConfigError {
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),

    #[error("unknown time zone {name:?}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },

    #[error("order number prefix must not be blank")]
    BlankPrefix,
}

/// Storefront settings.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Prefix of generated order numbers
    #[arg(long, env = "ORDER_NUMBER_PREFIX", default_value = DEFAULT_ORDER_NUMBER_PREFIX)]
    pub order_number_prefix: String,

    /// ISO 4217 currency of all prices
    #[arg(long, env = "CURRENCY", default_value = "RUB")]
    pub currency: String,

    /// IANA time zone used for booking times and order dates
    #[arg(long, env = "BUSINESS_TIME_ZONE", default_value = "Europe/Moscow")]
    pub business_time_zone: String,
}

impl StorefrontConfig {
    pub(crate) fn storefront(&self) -> Result<Storefront, StorefrontConfigError> {
        let prefix = self.order_number_prefix.trim();

        if prefix.is_empty() {
            return Err(StorefrontConfigError::BlankPrefix);
        }

        let currency = money::currency(&self.currency.trim().to_uppercase())
            .ok_or_else(|| StorefrontConfigError::UnknownCurrency(self.currency.clone()))?;

        let time_zone = TimeZone::get(&self.business_time_zone).map_err(|source| {
            StorefrontConfigError::UnknownTimeZone {
                name: self.business_time_zone.clone(),
                source,
            }
        })?;

        Ok(Storefront::new(currency, prefix, time_zone))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config(prefix: &str, currency: &str, zone: &str) -> StorefrontConfig {
        StorefrontConfig {
            order_number_prefix: prefix.to_string(),
            currency: currency.to_string(),
            business_time_zone: zone.to_string(),
        }
    }

    #[test]
    fn builds_storefront_from_settings() -> TestResult {
        let storefront = config(" HRS ", "rub", "UTC").storefront()?;

        assert_eq!(storefront.order_number_prefix(), "HRS");
        assert_eq!(storefront.currency().iso_alpha_code, "RUB");

        Ok(())
    }

    #[test]
    fn rejects_unknown_currency() {
        let result = config("AKZ", "XXQ", "UTC").storefront();

        assert!(
            matches!(result, Err(StorefrontConfigError::UnknownCurrency(code)) if code == "XXQ"),
            "expected unknown currency error"
        );
    }

    #[test]
    fn rejects_blank_prefix() {
        let result = config("  ", "RUB", "UTC").storefront();

        assert!(
            matches!(result, Err(StorefrontConfigError::BlankPrefix)),
            "expected blank prefix error"
        );
    }
}
