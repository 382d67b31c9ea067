//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa::orders::OrderLine;
use mensa_app::{auth::models::Role, domain::orders::models::Order};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    /// The menu item this line was priced from
    pub menu_item: Uuid,

    /// Item name at order time
    pub name: String,

    /// Unit price at order time, as a decimal string
    pub price: String,

    pub quantity: u32,
    pub instructions: Option<String>,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        OrderLineResponse {
            menu_item: line.menu_item,
            name: line.name,
            price: line.price.to_string(),
            quantity: line.quantity,
            instructions: line.instructions,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The customer who placed the order
    pub user: Uuid,

    /// Lifecycle state: pending, processing, completed or cancelled
    pub status: String,

    /// delivery or pickup
    pub delivery_type: String,

    pub payment_method: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone: String,

    /// Sum of line subtotals, as a decimal string
    pub items_price: String,

    pub tax_price: String,
    pub delivery_price: String,
    pub discount: String,
    pub total_price: String,

    pub coupon_code: Option<String>,

    /// Estimated hand-over time
    pub eta: String,

    pub lines: Vec<OrderLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user.into(),
            status: order.status.to_string(),
            delivery_type: order.delivery_type.to_string(),
            payment_method: order.payment_method,
            address: order.address,
            city: order.city,
            postal_code: order.postal_code,
            phone: order.phone,
            items_price: order.items_price.to_string(),
            tax_price: order.tax_price.to_string(),
            delivery_price: order.delivery_price.to_string(),
            discount: order.discount.to_string(),
            total_price: order.total_price.to_string(),
            coupon_code: order.coupon_code,
            eta: order.eta.to_string(),
            lines: order.lines.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order. Customers can only read their own orders;
/// administrators can read any.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The order"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    if order.user != user.uuid && user.role != Role::Admin {
        return Err(StatusError::forbidden().brief("Order belongs to another user"));
    }

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::{
        auth::models::UserUuid,
        domain::orders::{MockOrdersService, OrdersServiceError, models::OrderUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_ADMIN, TEST_USER, admin_service, user_service};

    use super::{super::tests::make_order, *};

    fn make_state(orders: MockOrdersService) -> Arc<State> {
        MockServices {
            orders,
            ..MockServices::default()
        }
        .into_state()
    }

    #[tokio::test]
    async fn test_owner_can_read_own_order() -> TestResult {
        let uuid = OrderUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |u| Ok(make_order(u, TEST_USER.uuid)));

        let service = user_service(
            make_state(orders),
            Router::with_path("orders/{uuid}").get(handler),
        );

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.status, "pending");
        assert_eq!(response.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_users_order_returns_403() -> TestResult {
        let uuid = OrderUuid::now_v7();
        let other = UserUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |u| Ok(make_order(u, other)));

        let service = user_service(
            make_state(orders),
            Router::with_path("orders/{uuid}").get(handler),
        );

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_can_read_any_order() -> TestResult {
        let uuid = OrderUuid::now_v7();
        let other = UserUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(move |u| Ok(make_order(u, other)));

        let service = admin_service(
            make_state(orders),
            Router::with_path("orders/{uuid}").get(handler),
        );

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.user, other.into_uuid());
        assert_ne!(response.user, TEST_ADMIN.uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let uuid = OrderUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let service = user_service(
            make_state(orders),
            Router::with_path("orders/{uuid}").get(handler),
        );

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
