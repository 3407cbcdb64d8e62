//! Order Records

use jiff::Timestamp;
use paddock::{
    delivery::DeliveryMethod,
    money::{self, Amount, AmountError},
    orders::{ContactDetails, OrderNumber, OrderStatus, PaymentMethod},
    subscriptions::Tier,
};

use crate::{
    domain::{catalog::records::CatalogItemUuid, profiles::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Record
///
/// Every monetary value is frozen at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: OrderNumber,
    pub user: UserUuid,
    pub contact: ContactDetails,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
    pub subtotal: Amount,
    pub discount: Amount,
    pub delivery_cost: Amount,
    pub assembly_cost: Amount,
    pub total: Amount,
    pub subscription_applied: Option<Tier>,
    pub subscription_savings: Amount,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub promo_code: Option<String>,
    pub notes: Option<String>,
    pub lines: Vec<OrderLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order: OrderUuid,
    pub item: CatalogItemUuid,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Amount,
}

impl OrderLineRecord {
    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Overflow`] if the total does not fit.
    pub fn total(&self) -> Result<Amount, AmountError> {
        money::times(&self.unit_price, self.quantity)
    }
}
