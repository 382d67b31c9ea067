//! App Router

use salvo::Router;

use crate::{
    auth::middleware, carts, coupons, healthcheck, menu_items, orders, reports, reviews, users,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        // Public catalog and registration.
        .push(
            Router::with_path("menu-items")
                .get(menu_items::index::handler)
                .push(Router::with_path("{uuid}").get(menu_items::get::handler)),
        )
        .push(
            Router::with_path("reviews/menu-item/{uuid}").get(reviews::for_menu_item::handler),
        )
        .push(
            Router::with_path("users")
                .post(users::register::handler)
                .push(Router::with_path("login").post(users::login::handler)),
        )
        // Signed-in customers.
        .push(
            Router::new()
                .hoop(middleware::authenticate)
                .push(
                    Router::with_path("users/profile")
                        .get(users::profile::handler)
                        .put(users::update_profile::handler),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .post(carts::add_item::handler)
                        .delete(carts::clear::handler)
                        .push(Router::with_path("sync").post(carts::sync::handler))
                        .push(
                            Router::with_path("{uuid}")
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                )
                .push(Router::with_path("coupons/validate").post(coupons::validate::handler))
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .push(Router::with_path("mine").get(orders::mine::handler))
                        .push(Router::with_path("{uuid}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("reviews")
                        .post(reviews::create::handler)
                        .push(Router::with_path("mine").get(reviews::mine::handler))
                        .push(
                            Router::with_path("{uuid}")
                                .put(reviews::update::handler)
                                .delete(reviews::delete::handler),
                        ),
                ),
        )
        // Admin surface.
        .push(
            Router::new()
                .hoop(middleware::authenticate)
                .hoop(middleware::require_admin)
                .push(Router::with_path("users").get(users::index::handler))
                .push(
                    Router::with_path("menu-items")
                        .post(menu_items::create::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .put(menu_items::update::handler)
                                .delete(menu_items::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("coupons")
                        .get(coupons::index::handler)
                        .post(coupons::create::handler)
                        .push(
                            Router::with_path("{uuid}")
                                .get(coupons::get::handler)
                                .put(coupons::update::handler)
                                .delete(coupons::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(
                            Router::with_path("{uuid}/status")
                                .put(orders::update_status::handler),
                        ),
                )
                .push(Router::with_path("reports/sales").get(reports::sales::handler)),
        )
}
