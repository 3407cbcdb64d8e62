//! Cart Records

use paddock::{
    cart::{CartBreakdown, CartLine},
    money::Amount,
};

use crate::{
    domain::{
        catalog::records::{CatalogItemUuid, Unit},
        profiles::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Cart Record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user: UserUuid,
}

/// Cart Line Record, joined with its catalog item.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub item: CatalogItemUuid,
    pub item_name: String,
    pub unit: Unit,
    pub quantity: u32,
    pub price_at_addition: Amount,
}

impl CartLineRecord {
    /// Engine view of the line.
    #[must_use]
    pub fn to_line(&self) -> CartLine {
        CartLine::new(
            self.uuid.into_uuid(),
            self.item.into_uuid(),
            self.quantity,
            self.price_at_addition,
        )
    }

    /// Copy quantity and snapshot price from an engine line.
    #[must_use]
    pub(crate) fn with_line(self, line: &CartLine) -> Self {
        Self {
            quantity: line.quantity(),
            price_at_addition: line.price_at_addition(),
            ..self
        }
    }
}

/// A cart with its lines and current totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub uuid: CartUuid,
    pub lines: Vec<CartLineRecord>,
    pub breakdown: CartBreakdown,
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityUpdate {
    Updated(CartLineRecord),
    Removed(CartLineUuid),
}
