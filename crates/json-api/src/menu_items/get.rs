//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::menu_items::models::MenuItem;

use crate::{extensions::*, menu_items::errors::into_status_error, state::State};

/// Menu Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    /// The unique identifier of the menu item
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Short description shown on the menu card
    pub description: String,

    /// Unit price as a decimal string
    pub price: String,

    /// Image location
    pub image_url: String,

    /// Free-text category
    pub category: String,

    /// Whether the item can currently be ordered
    pub availability: bool,

    /// The date and time the menu item was created
    pub created_at: String,

    /// The date and time the menu item was last updated
    pub updated_at: String,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        MenuItemResponse {
            uuid: item.uuid.into(),
            name: item.name,
            description: item.description,
            price: item.price.to_string(),
            image_url: item.image_url,
            category: item.category,
            availability: item.availability,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Menu Item Handler
///
/// Returns a menu item.
#[endpoint(tags("menu-items"), summary = "Get Menu Item")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu_items
        .get_menu_item(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
