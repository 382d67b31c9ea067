//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::reviews::models::NewReview;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, for_menu_item::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// The menu item being reviewed
    pub menu_item: Uuid,

    /// Star rating, 1 to 5
    pub rating: u8,

    #[serde(default)]
    pub comment: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            menu_item: request.menu_item.into(),
            rating: request.rating,
            comment: request.comment,
        }
    }
}

/// Create Review Handler
///
/// Leaves a review. Only items from the user's completed orders can be
/// reviewed, one review per item.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::FORBIDDEN, description = "No completed order with this item"),
        (status_code = StatusCode::CONFLICT, description = "Item already reviewed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let review = state
        .app
        .reviews
        .create_review(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
