//! Menu Item Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*, menu_items::errors::into_status_error, menu_items::get::MenuItemResponse,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemsResponse {
    /// The list of menu items
    pub menu_items: Vec<MenuItemResponse>,
}

/// Menu Item Index Handler
///
/// Returns the menu, optionally filtered by category.
#[endpoint(tags("menu-items"), summary = "List Menu Items")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MenuItemsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .menu_items
        .list_menu_items(category.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MenuItemsResponse {
        menu_items: items.into_iter().map(Into::into).collect(),
    }))
}
