//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Delete Review Handler
///
/// Deletes one of the authenticated user's reviews. Another user's
/// review reads as not found.
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .reviews
        .delete_review(uuid.into_inner().into(), user.uuid)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::OK);

    Ok(())
}
