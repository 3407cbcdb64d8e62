//! App Router

use salvo::Router;

use crate::{
    bookings, carts, catalog, customer, healthcheck, observability, orders, promotions, schedule,
};

/// Public routes, then everything that needs `x-customer-uuid`.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("schedule")
                .push(Router::with_path("dates").get(schedule::dates::handler))
                .push(Router::with_path("times").get(schedule::times::handler)),
        )
        .push(
            Router::with_path("horses/{horse}/availability")
                .get(bookings::availability::handler),
        )
        .push(customer_router())
}

fn customer_router() -> Router {
    Router::new()
        .hoop(customer::handler)
        .push(Router::with_path("catalog/items").get(catalog::items::handler))
        .push(
            Router::with_path("horses")
                .get(catalog::horses::handler)
                .push(Router::with_path("{horse}/quote").get(bookings::quote::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(Router::with_path("count").get(carts::count::handler))
                .push(Router::with_path("refresh").post(carts::refresh::handler))
                .push(
                    Router::with_path("items")
                        .post(carts::add_item::handler)
                        .push(
                            Router::with_path("{line}")
                                .patch(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                ),
        )
        .push(Router::with_path("promotions/evaluate").post(promotions::evaluate::handler))
        .push(Router::with_path("checkout").post(orders::checkout::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
        .push(
            Router::with_path("bookings")
                .get(bookings::index::handler)
                .post(bookings::create::handler)
                .push(Router::with_path("stats").get(bookings::stats::handler))
                .push(Router::with_path("{booking}/cancel").post(bookings::cancel::handler)),
        )
}
