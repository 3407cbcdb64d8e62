//! Cart Data

use crate::domain::catalog::records::CatalogItemUuid;

/// Item to add to the caller's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub item: CatalogItemUuid,
    pub quantity: u32,
}
