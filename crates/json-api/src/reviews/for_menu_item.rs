//! Menu Item Reviews Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::reviews::models::Review;

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    /// The unique identifier of the review
    pub uuid: Uuid,

    /// The reviewer
    pub user: Uuid,

    /// The reviewer's display name
    pub user_name: String,

    /// The reviewed menu item
    pub menu_item: Uuid,

    /// Star rating, 1 to 5
    pub rating: u8,

    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            uuid: review.uuid.into(),
            user: review.user.into(),
            user_name: review.user_name,
            menu_item: review.menu_item.into(),
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// The list of reviews, newest first
    pub reviews: Vec<ReviewResponse>,
}

/// Menu Item Reviews Handler
///
/// Returns the reviews for a menu item.
#[endpoint(tags("reviews"), summary = "List Menu Item Reviews")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_reviews_for_menu_item(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}
