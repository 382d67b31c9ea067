//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::carts::models::NewCartItem;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// The menu item to add
    pub menu_item: Uuid,

    pub quantity: u32,

    #[serde(default)]
    pub instructions: Option<String>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            menu_item: request.menu_item.into(),
            quantity: request.quantity,
            instructions: request.instructions,
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a line to the authenticated user's cart. Re-adding a menu item
/// sums quantities into the existing line.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown menu item or bad payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .carts
        .add_item(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_items(items)))
}
