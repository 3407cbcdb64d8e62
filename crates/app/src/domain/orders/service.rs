//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use paddock::{
    cart::Cart,
    orders::OrderStatus,
    settlement::settle,
    subscriptions::Subscription,
};
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartLineRecord,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        orders::{
            data::CheckoutRequest,
            errors::OrdersServiceError,
            numbers::{MAX_ORDER_NUMBER_ATTEMPTS, OrderNumbers},
            records::{OrderLineRecord, OrderRecord, OrderUuid},
            repository::{OrderInsert, PgOrdersRepository},
        },
        profiles::records::UserUuid,
    },
    storefront::Storefront,
};

/// How many orders the history view returns.
pub const ORDER_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    storefront: Storefront,
    numbers: OrderNumbers,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, storefront: Storefront) -> Self {
        Self::with_order_numbers(db, storefront, OrderNumbers::random())
    }

    #[must_use]
    pub fn with_order_numbers(db: Db, storefront: Storefront, numbers: OrderNumbers) -> Self {
        Self {
            db,
            storefront,
            numbers,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
        }
    }

    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut lines: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for line in self.orders_repository.get_order_lines(tx, &uuids).await? {
            lines.entry(line.order).or_default().push(line);
        }

        for order in &mut orders {
            order.lines = lines.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        user: UserUuid,
        subscription: Subscription,
        request: CheckoutRequest,
    ) -> Result<OrderRecord, OrdersServiceError> {
        request.contact.validate()?;

        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.lock_cart(&mut tx, user).await? else {
            return Err(OrdersServiceError::EmptyCart);
        };

        let lines = self.lines_repository.get_lines(&mut tx, cart.uuid).await?;

        let settlement = settle(
            &Cart::with_lines(
                lines.iter().map(CartLineRecord::to_line).collect::<Vec<_>>(),
                self.storefront.currency(),
            )?,
            self.storefront.policy(),
            subscription,
            request.delivery_method,
        )?;

        let today = self.storefront.local_date(Timestamp::now());
        let promo_code = request.promo_code();
        let notes = request.notes();

        let mut created = None;

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            let order_number = self
                .numbers
                .next(self.storefront.order_number_prefix(), today);

            let insert = OrderInsert {
                uuid: OrderUuid::new(),
                order_number: &order_number,
                user,
                contact: &request.contact,
                payment_method: request.payment_method,
                settlement: &settlement,
                promo_code: promo_code.as_deref(),
                notes: notes.as_deref(),
            };

            created = self.orders_repository.create_order(&mut tx, &insert).await?;

            if created.is_some() {
                break;
            }

            warn!(%order_number, attempt, "order number collision, regenerating");
        }

        let Some(mut order) = created else {
            return Err(OrdersServiceError::OrderNumberExhausted);
        };

        for line in &lines {
            let line = self
                .orders_repository
                .create_order_line(&mut tx, order.uuid, line)
                .await?;

            order.lines.push(line);
        }

        self.lines_repository.delete_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(
            user = %user,
            order_number = %order.order_number,
            total = %order.total,
            lines = order.lines.len(),
            subscription_applied = ?order.subscription_applied,
            "order settled"
        );

        Ok(order)
    }

    async fn list_orders(
        &self,
        user: UserUuid,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx, user, limit).await?;
        let orders = self.with_lines(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, user, order).await?;
        let order = self
            .with_lines(&mut tx, vec![order])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(order)
    }

    async fn transition_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders_repository.lock_order(&mut tx, order).await?;

        let next = current.status.transition_to(status)?;

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, next)
            .await?;

        let updated = self
            .with_lines(&mut tx, vec![updated])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        info!(
            order_number = %updated.order_number,
            from = %current.status,
            to = %next,
            "order status changed"
        );

        Ok(updated)
    }

    async fn mark_paid(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.orders_repository.mark_paid(&mut tx, order).await?;
        let updated = self
            .with_lines(&mut tx, vec![updated])
            .await?
            .pop()
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Settle the user's cart into an order.
    ///
    /// The cart row is locked for the whole settlement; its lines are removed
    /// once the order and its lines are written. Any failure leaves both the
    /// cart and the orders table untouched.
    async fn checkout(
        &self,
        user: UserUuid,
        subscription: Subscription,
        request: CheckoutRequest,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's most recent orders, newest first.
    async fn list_orders(
        &self,
        user: UserUuid,
        limit: u32,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One of the user's orders with its lines.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order along its lifecycle.
    async fn transition_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Record payment.
    async fn mark_paid(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use paddock::{
        delivery::DeliveryMethod,
        orders::{ContactDetails, OrderNumber, PaymentMethod},
        subscriptions::Tier,
    };
    use testresult::TestResult;

    use crate::{
        domain::carts::CartsService,
        test::{
            TestContext,
            helpers::{ItemFixture, add_to_cart, count_orders, create_item},
        },
    };

    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Anna Ivanova".to_string(),
            phone: "+7 900 123 45 67".to_string(),
            email: Some("anna@example.com".to_string()),
            city: "Kazan".to_string(),
            street: "Bauman".to_string(),
            house: "12".to_string(),
            apartment: None,
            postal_index: Some("420111".to_string()),
        }
    }

    fn request(delivery_method: DeliveryMethod) -> CheckoutRequest {
        CheckoutRequest {
            contact: contact(),
            delivery_method,
            payment_method: PaymentMethod::Sbp,
            promo_code: Some(" horse10 ".to_string()),
            notes: None,
        }
    }

    #[tokio::test]
    async fn checkout_snapshots_cart_and_empties_it() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let subscription = Subscription::active(Tier::Pro);
        let saddle = create_item(&ctx, ItemFixture::new("Saddle", 30_000_00, 27_000_00, 25_000_00)).await?;
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, subscription, saddle, 1).await?;
        add_to_cart(&ctx, user, subscription, hay, 5).await?;

        let before = ctx
            .carts
            .get_cart(user, subscription, DeliveryMethod::Courier)
            .await?;

        let order = ctx
            .orders
            .checkout(user, subscription, request(DeliveryMethod::Courier))
            .await?;

        assert_eq!(order.subtotal, before.breakdown.subtotal);
        assert_eq!(order.discount, before.breakdown.discount);
        assert_eq!(order.delivery_cost, before.breakdown.delivery_cost);
        assert_eq!(order.assembly_cost, before.breakdown.assembly_cost);
        assert_eq!(order.total, before.breakdown.total);

        // 25 000 + 5 × 80 = 25 400.00, pro discount 20 %, free delivery, 5 % assembly
        assert_eq!(order.subtotal.to_minor_units(), 25_400_00);
        assert_eq!(order.discount.to_minor_units(), 5_080_00);
        assert_eq!(order.delivery_cost.to_minor_units(), 0);
        assert_eq!(order.assembly_cost.to_minor_units(), 1_270_00);
        assert_eq!(order.total.to_minor_units(), 21_590_00);
        assert_eq!(order.subscription_applied, Some(Tier::Pro));
        assert_eq!(order.subscription_savings, order.discount);

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_paid);
        assert_eq!(order.promo_code.as_deref(), Some("horse10"));
        assert!(order.order_number.as_str().starts_with("AKZ-"));
        assert_eq!(order.lines.len(), 2);

        let after = ctx
            .carts
            .get_cart(user, subscription, DeliveryMethod::Courier)
            .await?;

        assert_eq!(after.uuid, before.uuid);
        assert!(after.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_persists_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();

        let result = ctx
            .orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(count_orders(&ctx, user).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn second_checkout_sees_an_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 1).await?;

        ctx.orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Post))
            .await?;

        let result = ctx
            .orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Post))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert_eq!(count_orders(&ctx, user).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_checkouts_create_one_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 3).await?;

        let (first, second) = tokio::join!(
            ctx.orders
                .checkout(user, Subscription::free(), request(DeliveryMethod::Courier)),
            ctx.orders
                .checkout(user, Subscription::free(), request(DeliveryMethod::Courier)),
        );

        let outcomes = [first, second];

        assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|outcome| matches!(outcome, Err(OrdersServiceError::EmptyCart)))
        );
        assert_eq!(count_orders(&ctx, user).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_contact_field_is_rejected_before_touching_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 1).await?;

        let mut checkout = request(DeliveryMethod::Courier);
        checkout.contact.house = " ".to_string();

        let result = ctx.orders.checkout(user, Subscription::free(), checkout).await;

        assert!(
            matches!(result, Err(OrdersServiceError::MissingField("house"))),
            "expected MissingField, got {result:?}"
        );
        assert_eq!(ctx.carts.count_items(user).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn colliding_order_numbers_are_regenerated_then_exhausted() -> TestResult {
        let ctx = TestContext::new().await;
        let orders = PgOrdersService::with_order_numbers(
            ctx.app_db(),
            ctx.storefront.clone(),
            OrderNumbers::from_fn(|prefix, _| {
                OrderNumber::from_string(format!("{prefix}-20240101-000001"))
            }),
        );
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        let first_user = UserUuid::new();
        add_to_cart(&ctx, first_user, Subscription::free(), hay, 1).await?;
        orders
            .checkout(first_user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await?;

        let second_user = UserUuid::new();
        add_to_cart(&ctx, second_user, Subscription::free(), hay, 1).await?;

        let result = orders
            .checkout(second_user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::OrderNumberExhausted)),
            "expected OrderNumberExhausted, got {result:?}"
        );
        assert_eq!(count_orders(&ctx, second_user).await?, 0);
        assert_eq!(ctx.carts.count_items(second_user).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn history_is_scoped_to_the_user_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        let mut placed = Vec::new();

        for quantity in 1..=3 {
            add_to_cart(&ctx, user, Subscription::free(), hay, quantity).await?;

            placed.push(
                ctx.orders
                    .checkout(user, Subscription::free(), request(DeliveryMethod::Pickup))
                    .await?
                    .uuid,
            );
        }

        let history = ctx.orders.list_orders(user, 2).await?;

        assert_eq!(
            history.iter().map(|order| order.uuid).collect::<Vec<_>>(),
            placed.iter().rev().take(2).copied().collect::<Vec<_>>()
        );
        assert!(history.iter().all(|order| order.lines.len() == 1));

        assert!(ctx.orders.list_orders(UserUuid::new(), 10).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn another_users_order_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 1).await?;
        let order = ctx
            .orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await?;

        let own = ctx.orders.get_order(user, order.uuid).await?;
        assert_eq!(own, order);

        let result = ctx.orders.get_order(UserUuid::new(), order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn status_follows_the_lifecycle() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 1).await?;
        let order = ctx
            .orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await?;

        let skipped = ctx
            .orders
            .transition_status(order.uuid, OrderStatus::Shipped)
            .await;

        assert!(
            matches!(
                skipped,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Shipped,
                })
            ),
            "expected InvalidTransition, got {skipped:?}"
        );

        let confirmed = ctx
            .orders
            .transition_status(order.uuid, OrderStatus::Confirmed)
            .await?;
        assert_eq!(confirmed.status, OrderStatus::Confirmed);

        let cancelled = ctx
            .orders
            .transition_status(order.uuid, OrderStatus::Cancelled)
            .await?;
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let reopened = ctx
            .orders
            .transition_status(order.uuid, OrderStatus::Confirmed)
            .await;
        assert!(matches!(
            reopened,
            Err(OrdersServiceError::InvalidTransition { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn mark_paid_sets_the_payment_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let user = UserUuid::new();
        let hay = create_item(&ctx, ItemFixture::new("Hay", 100_00, 90_00, 80_00)).await?;

        add_to_cart(&ctx, user, Subscription::free(), hay, 1).await?;
        let order = ctx
            .orders
            .checkout(user, Subscription::free(), request(DeliveryMethod::Pickup))
            .await?;

        let paid = ctx.orders.mark_paid(order.uuid).await?;

        assert!(paid.is_paid);
        assert_eq!(paid.status, OrderStatus::Pending);
        assert_eq!(paid.lines, order.lines);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.mark_paid(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
