//! Order number generation

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use jiff::civil::Date;
use paddock::orders::OrderNumber;

/// How many numbers checkout tries before giving up.
pub const MAX_ORDER_NUMBER_ATTEMPTS: usize = 5;

type Generate = dyn Fn(&str, Date) -> OrderNumber + Send + Sync;

/// Source of candidate order numbers.
#[derive(Clone)]
pub struct OrderNumbers(Arc<Generate>);

impl OrderNumbers {
    /// Random six-hex-digit suffixes.
    #[must_use]
    pub fn random() -> Self {
        Self::from_fn(|prefix, date| OrderNumber::generate(prefix, date, &mut rand::thread_rng()))
    }

    pub fn from_fn<F>(generate: F) -> Self
    where
        F: Fn(&str, Date) -> OrderNumber + Send + Sync + 'static,
    {
        Self(Arc::new(generate))
    }

    pub(crate) fn next(&self, prefix: &str, date: Date) -> OrderNumber {
        (self.0)(prefix, date)
    }
}

impl Default for OrderNumbers {
    fn default() -> Self {
        Self::random()
    }
}

impl Debug for OrderNumbers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("OrderNumbers")
    }
}
