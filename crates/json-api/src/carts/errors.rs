//! Cart Errors

use mensa_app::domain::carts::CartsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Menu item not found")
        }
        CartsServiceError::AlreadyExists
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart payload"),
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
