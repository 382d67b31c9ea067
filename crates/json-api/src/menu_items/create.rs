//! Create Menu Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mensa_app::domain::menu_items::models::NewMenuItem;

use crate::{
    extensions::*,
    menu_items::{errors::into_status_error, get::MenuItemResponse},
    state::State,
};

fn default_availability() -> bool {
    true
}

/// Create Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateMenuItemRequest {
    pub name: String,
    pub description: String,

    /// Unit price as a decimal string
    pub price: String,

    pub image_url: String,
    pub category: String,

    /// Defaults to available when omitted
    #[serde(default = "default_availability")]
    pub availability: bool,
}

impl CreateMenuItemRequest {
    fn into_new_menu_item(self) -> Result<NewMenuItem, StatusError> {
        Ok(NewMenuItem {
            name: self.name,
            description: self.description,
            price: self.price.as_str().into_money("price")?,
            image_url: self.image_url,
            category: self.category,
            availability: self.availability,
        })
    }
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Create Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::CONFLICT, description = "Menu item already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateMenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu_items
        .create_menu_item(json.into_inner().into_new_menu_item()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/menu-items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use mensa_app::domain::menu_items::{MockMenuItemsService, models::MenuItemUuid};

    use crate::test_helpers::{MockServices, admin_service};

    use super::{super::tests::make_menu_item, *};

    fn make_service(menu_items: MockMenuItemsService) -> Service {
        let state = MockServices {
            menu_items,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("menu-items").post(handler))
    }

    #[tokio::test]
    async fn test_create_menu_item_success() -> TestResult {
        let uuid = MenuItemUuid::now_v7();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_create_menu_item()
            .once()
            .withf(|new| new.name == "Classic Burger" && new.price == Decimal::new(200, 0))
            .return_once(move |_| Ok(make_menu_item(uuid)));

        let mut res = TestClient::post("http://example.com/menu-items")
            .json(&json!({
                "name": "Classic Burger",
                "description": "Beef patty, brioche bun",
                "price": "200",
                "image_url": "/images/classic-burger.jpg",
                "category": "burgers",
            }))
            .send(&make_service(menu_items))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/menu-items/{uuid}").as_str()));

        let body: MenuItemResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());
        assert!(body.availability, "omitted availability should default on");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_bad_price_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/menu-items")
            .json(&json!({
                "name": "Classic Burger",
                "description": "Beef patty, brioche bun",
                "price": "not-a-number",
                "image_url": "/images/classic-burger.jpg",
                "category": "burgers",
            }))
            .send(&make_service(MockMenuItemsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
