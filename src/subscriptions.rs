//! Subscriptions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unknown tier name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown subscription tier: {0}")]
pub struct UnknownTier(pub String);

/// Subscription level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// No subscription.
    #[default]
    Free,

    /// Premium subscription.
    Premium,

    /// Professional subscription.
    Pro,
}

impl Tier {
    /// Stored name of the tier.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
            Tier::Pro => "pro",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "premium" => Ok(Tier::Premium),
            "pro" => Ok(Tier::Pro),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// A user's subscription as of the start of a request.
///
/// This is the only input that varies prices across the system. It is passed
/// explicitly into every pricing operation rather than read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subscription {
    tier: Tier,
    active: bool,
}

impl Subscription {
    /// Create a subscription snapshot.
    pub fn new(tier: Tier, active: bool) -> Self {
        Self { tier, active }
    }

    /// The snapshot used for users without a profile.
    pub fn free() -> Self {
        Self::default()
    }

    /// Active subscription at the given tier.
    pub fn active(tier: Tier) -> Self {
        Self::new(tier, true)
    }

    /// Stored tier, regardless of whether it is active.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Whether the subscription is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tier that pricing should use: the stored tier if active, otherwise free.
    pub fn effective_tier(&self) -> Tier {
        if self.active { self.tier } else { Tier::Free }
    }

    /// Whether subscription benefits apply at all.
    pub fn has_benefits(&self) -> bool {
        self.effective_tier() != Tier::Free
    }
}
