//! Update Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::reviews::models::ReviewUpdate;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, for_menu_item::ReviewResponse},
    state::State,
};

/// Update Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateReviewRequest {
    /// Star rating, 1 to 5
    pub rating: u8,

    #[serde(default)]
    pub comment: Option<String>,
}

impl From<UpdateReviewRequest> for ReviewUpdate {
    fn from(request: UpdateReviewRequest) -> Self {
        ReviewUpdate {
            rating: request.rating,
            comment: request.comment,
        }
    }
}

/// Update Review Handler
///
/// Edits one of the authenticated user's reviews. Another user's review
/// reads as not found.
#[endpoint(
    tags("reviews"),
    summary = "Update Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let review = state
        .app
        .reviews
        .update_review(uuid.into_inner().into(), user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::reviews::{
        MockReviewsService, ReviewsServiceError, models::ReviewUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_USER, user_service};

    use super::{super::tests::make_review, *};

    fn make_service(reviews: MockReviewsService) -> Service {
        let state = MockServices {
            reviews,
            ..MockServices::default()
        }
        .into_state();

        user_service(state, Router::with_path("reviews/{uuid}").put(handler))
    }

    #[tokio::test]
    async fn test_update_own_review() -> TestResult {
        let uuid = ReviewUuid::now_v7();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_update_review()
            .once()
            .withf(move |u, user, update| {
                *u == uuid && *user == TEST_USER.uuid && update.rating == 2
            })
            .return_once(move |u, user, _| Ok(make_review(u, user)));

        let response: ReviewResponse =
            TestClient::put(format!("http://example.com/reviews/{uuid}"))
                .json(&json!({ "rating": 2, "comment": "Went downhill" }))
                .send(&make_service(reviews))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_another_users_review_returns_404() -> TestResult {
        let uuid = ReviewUuid::now_v7();

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_update_review()
            .once()
            .return_once(|_, _, _| Err(ReviewsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/reviews/{uuid}"))
            .json(&json!({ "rating": 1 }))
            .send(&make_service(reviews))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
