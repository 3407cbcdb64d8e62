//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use paddock::{
    cart::{Cart, QuantityChange},
    delivery::DeliveryMethod,
    pricing::resolve_price,
    subscriptions::Subscription,
};
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartLine,
            errors::CartsServiceError,
            records::{CartLineRecord, CartLineUuid, CartRecord, CartView, QuantityUpdate},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        catalog::{records::CatalogItemUuid, repository::PgCatalogRepository},
        profiles::records::UserUuid,
    },
    storefront::Storefront,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    storefront: Storefront,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
    catalog_repository: PgCatalogRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db, storefront: Storefront) -> Self {
        Self {
            db,
            storefront,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
        }
    }

    async fn load(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(CartRecord, Vec<CartLineRecord>, Cart), CartsServiceError> {
        let record = self.carts_repository.get_or_create_cart(tx, user).await?;
        let lines = self.lines_repository.get_lines(tx, record.uuid).await?;

        let cart = Cart::with_lines(
            lines.iter().map(CartLineRecord::to_line).collect::<Vec<_>>(),
            self.storefront.currency(),
        )?;

        Ok((record, lines, cart))
    }

    fn view(
        &self,
        record: CartRecord,
        lines: Vec<CartLineRecord>,
        cart: &Cart,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartsServiceError> {
        let breakdown = cart.breakdown(self.storefront.policy(), delivery_method, subscription)?;

        Ok(CartView {
            uuid: record.uuid,
            lines,
            breakdown,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        user: UserUuid,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines, cart) = self.load(&mut tx, user).await?;

        tx.commit().await?;

        self.view(record, lines, &cart, subscription, delivery_method)
    }

    async fn refresh_cart(
        &self,
        user: UserUuid,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines, mut cart) = self.load(&mut tx, user).await?;

        let item_uuids: Vec<CatalogItemUuid> = lines.iter().map(|line| line.item).collect();

        let prices: FxHashMap<_, _> = self
            .catalog_repository
            .get_items(&mut tx, &item_uuids)
            .await?
            .into_iter()
            .map(|item| {
                (
                    item.uuid.into_uuid(),
                    resolve_price(&item.prices, subscription),
                )
            })
            .collect();

        let repriced = cart.refresh_prices(|item| prices.get(&item).copied())?;

        if repriced > 0 {
            for line in cart.lines() {
                self.lines_repository
                    .save_line(&mut tx, record.uuid, line)
                    .await?;
            }
        }

        tx.commit().await?;

        debug!(user = %user, repriced, "refreshed cart prices");

        let lines = lines
            .into_iter()
            .zip(cart.lines())
            .map(|(record, line)| record.with_line(line))
            .collect();

        self.view(record, lines, &cart, subscription, delivery_method)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        subscription: Subscription,
        new_line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self
            .catalog_repository
            .get_item(&mut tx, new_line.item)
            .await?;

        let (record, _lines, mut cart) = self.load(&mut tx, user).await?;

        let price = resolve_price(&item.prices, subscription);

        let line = cart.add_item(item.uuid.into_uuid(), new_line.quantity, price)?;

        self.lines_repository
            .save_line(&mut tx, record.uuid, &line)
            .await?;

        tx.commit().await?;

        info!(
            user = %user,
            item = %item.uuid,
            quantity = line.quantity(),
            price = %price,
            "added item to cart"
        );

        Ok(CartLineRecord {
            uuid: CartLineUuid::from_uuid(line.uuid()),
            item: item.uuid,
            item_name: item.name,
            unit: item.unit,
            quantity: line.quantity(),
            price_at_addition: line.price_at_addition(),
        })
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<QuantityUpdate, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let (record, lines, mut cart) = self.load(&mut tx, user).await?;

        let update = match cart.update_quantity(line.into_uuid(), quantity)? {
            QuantityChange::Updated(updated) => {
                self.lines_repository
                    .save_line(&mut tx, record.uuid, &updated)
                    .await?;

                let existing = lines
                    .into_iter()
                    .find(|existing| existing.uuid == line)
                    .ok_or(CartsServiceError::NotFound)?;

                QuantityUpdate::Updated(existing.with_line(&updated))
            }
            QuantityChange::Removed(_) => {
                self.lines_repository
                    .delete_line(&mut tx, record.uuid, line)
                    .await?;

                QuantityUpdate::Removed(line)
            }
        };

        tx.commit().await?;

        Ok(update)
    }

    async fn remove_item(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let rows_affected = self
            .lines_repository
            .delete_line(&mut tx, record.uuid, line)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let removed = self.lines_repository.delete_lines(&mut tx, record.uuid).await?;

        tx.commit().await?;

        Ok(removed)
    }

    async fn count_items(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.lines_repository.count_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with totals for the given subscription and delivery method.
    async fn get_cart(
        &self,
        user: UserUuid,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartsServiceError>;

    /// Reprice every line at the current tier price, then return the cart.
    async fn refresh_cart(
        &self,
        user: UserUuid,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartsServiceError>;

    /// Add an item at the price resolved for `subscription`.
    ///
    /// Adding an item that is already in the cart increments its quantity and
    /// reprices the whole line.
    async fn add_item(
        &self,
        user: UserUuid,
        subscription: Subscription,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Overwrite a line's quantity; zero or less removes it.
    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<QuantityUpdate, CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_item(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError>;

    /// Remove every line, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;

    /// Number of lines in the user's cart, matching the breakdown's `item_count`.
    async fn count_items(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}
