//! Review Errors

use mensa_app::domain::reviews::ReviewsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::NotEligible => StatusError::forbidden()
            .brief("Reviews are limited to items from your completed orders"),
        ReviewsServiceError::AlreadyExists => {
            StatusError::conflict().brief("You have already reviewed this item")
        }
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::Sql(source) => {
            error!("review storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
