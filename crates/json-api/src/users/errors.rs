//! User Errors

use mensa_app::auth::AuthServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        AuthServiceError::NotFound => StatusError::not_found(),
        AuthServiceError::MissingRequiredData | AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
