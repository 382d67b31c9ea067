//! Menu Item Errors

use mensa_app::domain::menu_items::MenuItemsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: MenuItemsServiceError) -> StatusError {
    match error {
        MenuItemsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Menu item already exists")
        }
        MenuItemsServiceError::InvalidReference
        | MenuItemsServiceError::MissingRequiredData
        | MenuItemsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid menu item payload")
        }
        MenuItemsServiceError::NotFound => StatusError::not_found(),
        MenuItemsServiceError::Sql(source) => {
            error!("menu item storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
