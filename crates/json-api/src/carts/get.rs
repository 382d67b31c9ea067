//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::carts::models::CartItem;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The menu item this line refers to
    pub menu_item: Uuid,

    /// Menu item name at read time
    pub name: String,

    /// Unit price as a decimal string
    pub price: String,

    pub image_url: String,
    pub quantity: u32,
    pub instructions: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            menu_item: item.menu_item.into(),
            name: item.name,
            price: item.price.to_string(),
            image_url: item.image_url,
            quantity: item.quantity,
            instructions: item.instructions,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The lines currently in the cart
    pub items: Vec<CartItemResponse>,
}

impl CartResponse {
    pub(crate) fn from_items(items: Vec<CartItem>) -> Self {
        CartResponse {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the authenticated user's cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let items = state
        .app
        .carts
        .get_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::from_items(items)))
}
