//! Order Responses

use paddock::{money::AmountError, orders::ContactDetails};
use paddock_app::domain::orders::records::{OrderLineRecord, OrderRecord};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::MoneyResponse;

/// Contact Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub street: String,
    pub house: String,
    pub apartment: Option<String>,
    pub postal_index: Option<String>,
}

impl From<ContactDetails> for ContactResponse {
    fn from(contact: ContactDetails) -> Self {
        Self {
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            city: contact.city,
            street: contact.street,
            house: contact.house,
            apartment: contact.apartment,
            postal_index: contact.postal_index,
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub uuid: Uuid,

    /// Catalog item UUID
    pub item: Uuid,

    /// Item name at the time of the order
    pub item_name: String,

    pub quantity: u32,

    /// Unit price frozen at checkout
    pub unit_price: MoneyResponse,

    pub total: MoneyResponse,
}

impl TryFrom<OrderLineRecord> for OrderLineResponse {
    type Error = AmountError;

    fn try_from(line: OrderLineRecord) -> Result<Self, Self::Error> {
        let total = line.total()?;

        Ok(Self {
            uuid: line.uuid.into(),
            item: line.item.into(),
            item_name: line.item_name,
            quantity: line.quantity,
            unit_price: MoneyResponse::from(&line.unit_price),
            total: MoneyResponse::from(total),
        })
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `PREFIX-YYYYMMDD-XXXXXX`
    pub order_number: String,

    pub status: String,

    pub is_paid: bool,

    pub contact: ContactResponse,

    pub delivery_method: String,

    pub payment_method: String,

    pub subtotal: MoneyResponse,

    pub discount: MoneyResponse,

    pub delivery_cost: MoneyResponse,

    pub assembly_cost: MoneyResponse,

    pub total: MoneyResponse,

    /// Tier whose discount was applied
    pub subscription_applied: Option<String>,

    pub subscription_savings: MoneyResponse,

    /// Code entered at checkout, kept for reference only
    pub promo_code: Option<String>,

    pub notes: Option<String>,

    pub lines: Vec<OrderLineResponse>,

    pub created_at: String,
}

impl TryFrom<OrderRecord> for OrderResponse {
    type Error = AmountError;

    fn try_from(order: OrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: order.uuid.into(),
            order_number: order.order_number.to_string(),
            status: order.status.as_str().to_string(),
            is_paid: order.is_paid,
            contact: order.contact.into(),
            delivery_method: order.delivery_method.as_str().to_string(),
            payment_method: order.payment_method.as_str().to_string(),
            subtotal: MoneyResponse::from(&order.subtotal),
            discount: MoneyResponse::from(&order.discount),
            delivery_cost: MoneyResponse::from(&order.delivery_cost),
            assembly_cost: MoneyResponse::from(&order.assembly_cost),
            total: MoneyResponse::from(&order.total),
            subscription_applied: order
                .subscription_applied
                .map(|tier| tier.as_str().to_string()),
            subscription_savings: MoneyResponse::from(&order.subscription_savings),
            promo_code: order.promo_code,
            notes: order.notes,
            lines: order
                .lines
                .into_iter()
                .map(OrderLineResponse::try_from)
                .collect::<Result<_, _>>()?,
            created_at: order.created_at.to_string(),
        })
    }
}
