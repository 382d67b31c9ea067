//! Sync Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{add_item::AddCartItemRequest, errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Sync Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SyncCartRequest {
    /// The lines that should replace the server cart
    pub items: Vec<AddCartItemRequest>,
}

/// Sync Cart Handler
///
/// Replaces the server cart wholesale with the given lines, typically
/// after sign-in when a guest cart exists on the device. Lines whose
/// menu item no longer exists are dropped.
#[endpoint(
    tags("cart"),
    summary = "Sync Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Synced cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SyncCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = json
        .into_inner()
        .items
        .into_iter()
        .map(Into::into)
        .collect();

    let synced = state
        .app
        .carts
        .sync_cart(user.uuid, items)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_items(synced)))
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::{carts::MockCartsService, menu_items::models::MenuItemUuid};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_USER, user_service};

    use super::{super::tests::make_cart_item, *};

    fn make_service(carts: MockCartsService) -> Service {
        let state = MockServices {
            carts,
            ..MockServices::default()
        }
        .into_state();

        user_service(state, Router::with_path("cart/sync").post(handler))
    }

    #[tokio::test]
    async fn test_sync_replaces_cart() -> TestResult {
        let kept = MenuItemUuid::now_v7();
        let dropped = MenuItemUuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_sync_cart()
            .once()
            .withf(move |user, items| {
                *user == TEST_USER.uuid
                    && items.len() == 2
                    && items.iter().any(|i| i.menu_item == kept)
            })
            .return_once(move |_, _| Ok(vec![make_cart_item(kept)]));

        let response: CartResponse = TestClient::post("http://example.com/cart/sync")
            .json(&json!({
                "items": [
                    { "menu_item": kept.into_uuid(), "quantity": 2, "instructions": "no onions" },
                    { "menu_item": dropped.into_uuid(), "quantity": 1 },
                ],
            }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert_eq!(response.items.len(), 1, "unknown line should be dropped");
        assert_eq!(
            response.items.first().map(|i| i.menu_item),
            Some(kept.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_sync_empty_list_clears_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_sync_cart()
            .once()
            .withf(|_, items| items.is_empty())
            .return_once(|_, _| Ok(vec![]));

        let response: CartResponse = TestClient::post("http://example.com/cart/sync")
            .json(&json!({ "items": [] }))
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(response.items.is_empty());

        Ok(())
    }
}
