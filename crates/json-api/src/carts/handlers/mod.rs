//! Cart Handlers

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod count;
pub(crate) mod get;
pub(crate) mod refresh;
pub(crate) mod remove_item;
pub(crate) mod update_item;

#[cfg(test)]
pub(crate) mod fixtures {
    use paddock::{
        cart::{Cart, CartError},
        delivery::DeliveryMethod,
        policy::PricingPolicy,
        subscriptions::Subscription,
    };
    use paddock_app::domain::{
        carts::records::{CartLineRecord, CartLineUuid, CartUuid, CartView},
        catalog::records::{CatalogItemUuid, Unit},
    };
    use rusty_money::{Money, iso::RUB};

    pub(crate) fn make_line(name: &str, quantity: u32, minor: i64) -> CartLineRecord {
        CartLineRecord {
            uuid: CartLineUuid::new(),
            item: CatalogItemUuid::new(),
            item_name: name.to_string(),
            unit: Unit::Kg,
            quantity,
            price_at_addition: Money::from_minor(minor, RUB),
        }
    }

    pub(crate) fn make_view(
        lines: Vec<CartLineRecord>,
        subscription: Subscription,
        delivery_method: DeliveryMethod,
    ) -> Result<CartView, CartError> {
        let mut cart = Cart::new(RUB);

        for line in &lines {
            cart.add_item(line.item.into_uuid(), line.quantity, line.price_at_addition)?;
        }

        let breakdown = cart.breakdown(&PricingPolicy::standard(RUB), delivery_method, subscription)?;

        Ok(CartView {
            uuid: CartUuid::new(),
            lines,
            breakdown,
        })
    }
}
