//! Update Order Status Handler

use std::{str::FromStr, sync::Arc};

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa::orders::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// pending, processing, completed or cancelled
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order through its lifecycle.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = OrderStatus::from_str(&json.into_inner().status)
        .map_err(|_error| StatusError::bad_request().brief("Unknown order status"))?;

    let order = state
        .app
        .orders
        .update_order_status(uuid.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::{
        auth::models::UserUuid,
        domain::orders::{MockOrdersService, OrdersServiceError, models::OrderUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, admin_service};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        let state = MockServices {
            orders,
            ..MockServices::default()
        }
        .into_state();

        admin_service(
            state,
            Router::with_path("orders/{uuid}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_status_success() -> TestResult {
        let uuid = OrderUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .withf(move |u, status| *u == uuid && *status == OrderStatus::Processing)
            .return_once(move |u, _| {
                let mut order = make_order(u, UserUuid::now_v7());
                order.status = OrderStatus::Processing;
                Ok(order)
            });

        let response: OrderResponse =
            TestClient::put(format!("http://example.com/orders/{uuid}/status"))
                .json(&json!({ "status": "processing" }))
                .send(&make_service(orders))
                .await
                .take_json()
                .await?;

        assert_eq!(response.status, "processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = OrderUuid::now_v7();

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "teleported" }))
            .send(&make_service(MockOrdersService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_returns_404() -> TestResult {
        let uuid = OrderUuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_update_order_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/orders/{uuid}/status"))
            .json(&json!({ "status": "completed" }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
