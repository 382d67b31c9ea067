//! Update Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::menu_items::models::MenuItemUpdate;

use crate::{
    extensions::*,
    menu_items::{errors::into_status_error, get::MenuItemResponse},
    state::State,
};

/// Update Menu Item Request; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateMenuItemRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Unit price as a decimal string
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub availability: Option<bool>,
}

impl UpdateMenuItemRequest {
    fn into_update(self) -> Result<MenuItemUpdate, StatusError> {
        let price = match self.price {
            Some(price) => Some(price.as_str().into_money("price")?),
            None => None,
        };

        Ok(MenuItemUpdate {
            name: self.name,
            description: self.description,
            price,
            image_url: self.image_url,
            category: self.category,
            availability: self.availability,
        })
    }
}

/// Update Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Update Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateMenuItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu_items
        .update_menu_item(uuid.into_inner().into(), json.into_inner().into_update()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
