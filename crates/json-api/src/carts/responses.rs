//! Cart Responses

use paddock::{
    cart::CartBreakdown,
    money::AmountError,
    subscriptions::Subscription,
};
use paddock_app::domain::carts::records::{CartLineRecord, CartView};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::MoneyResponse;

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Line UUID
    pub uuid: Uuid,

    /// Catalog item UUID
    pub item: Uuid,

    pub item_name: String,

    /// Sale unit (kg, piece, pack, liter, bag)
    pub unit: String,

    pub quantity: u32,

    /// Unit price captured when the item was added
    pub price_at_addition: MoneyResponse,

    /// `price_at_addition × quantity`
    pub line_total: MoneyResponse,
}

impl TryFrom<&CartLineRecord> for CartLineResponse {
    type Error = AmountError;

    fn try_from(line: &CartLineRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: line.uuid.into(),
            item: line.item.into(),
            item_name: line.item_name.clone(),
            unit: line.unit.as_str().to_string(),
            quantity: line.quantity,
            price_at_addition: MoneyResponse::from(&line.price_at_addition),
            line_total: MoneyResponse::from(line.to_line().total()?),
        })
    }
}

/// Cart Totals Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartTotalsResponse {
    /// Number of distinct lines
    pub item_count: u64,

    /// Sum of line quantities
    pub total_quantity: u64,

    pub subtotal: MoneyResponse,

    /// Subscription discount
    pub discount: MoneyResponse,

    /// Discount rate in percent, e.g. `"20"`
    pub discount_percent: String,

    pub delivery_method: String,

    pub delivery_cost: MoneyResponse,

    pub assembly_cost: MoneyResponse,

    pub total: MoneyResponse,
}

impl From<&CartBreakdown> for CartTotalsResponse {
    fn from(breakdown: &CartBreakdown) -> Self {
        Self {
            item_count: u64::try_from(breakdown.item_count).unwrap_or(u64::MAX),
            total_quantity: breakdown.total_quantity,
            subtotal: MoneyResponse::from(&breakdown.subtotal),
            discount: MoneyResponse::from(&breakdown.discount),
            discount_percent: breakdown.discount_percent.normalize().to_string(),
            delivery_method: breakdown.delivery_method.as_str().to_string(),
            delivery_cost: MoneyResponse::from(&breakdown.delivery_cost),
            assembly_cost: MoneyResponse::from(&breakdown.assembly_cost),
            total: MoneyResponse::from(&breakdown.total),
        }
    }
}

/// Subscription Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    /// free, premium or pro
    pub tier: String,

    pub active: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            tier: subscription.tier().as_str().to_string(),
            active: subscription.is_active(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Cart UUID
    pub uuid: Uuid,

    pub lines: Vec<CartLineResponse>,

    pub totals: CartTotalsResponse,

    /// Subscription the totals were computed for
    pub subscription: SubscriptionResponse,
}

impl CartResponse {
    pub(crate) fn new(view: &CartView, subscription: Subscription) -> Result<Self, AmountError> {
        Ok(Self {
            uuid: view.uuid.into(),
            lines: view
                .lines
                .iter()
                .map(CartLineResponse::try_from)
                .collect::<Result<_, _>>()?,
            totals: CartTotalsResponse::from(&view.breakdown),
            subscription: subscription.into(),
        })
    }
}
