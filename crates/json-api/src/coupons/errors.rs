//! Coupon Errors

use mensa_app::domain::coupons::CouponsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon code is already in use")
        }
        CouponsServiceError::InvalidReference
        | CouponsServiceError::MissingRequiredData
        | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::NotFound => StatusError::not_found(),
        CouponsServiceError::Sql(source) => {
            error!("coupon storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
