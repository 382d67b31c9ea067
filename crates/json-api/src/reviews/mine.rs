//! My Reviews Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, for_menu_item::ReviewsResponse},
    state::State,
};

/// My Reviews Handler
///
/// Returns the authenticated user's reviews.
#[endpoint(
    tags("reviews"),
    summary = "List My Reviews",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let reviews = state
        .app
        .reviews
        .list_reviews_for_user(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReviewsResponse {
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::reviews::{MockReviewsService, models::ReviewUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_USER, user_service};

    use super::{super::tests::make_review, *};

    #[tokio::test]
    async fn test_mine_returns_own_reviews() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_reviews_for_user()
            .once()
            .withf(|user| *user == TEST_USER.uuid)
            .return_once(|user| Ok(vec![make_review(ReviewUuid::now_v7(), user)]));

        let state = MockServices {
            reviews,
            ..MockServices::default()
        }
        .into_state();

        let response: ReviewsResponse = TestClient::get("http://example.com/reviews/mine")
            .send(&user_service(
                state,
                Router::with_path("reviews/mine").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.reviews.len(), 1);
        assert_eq!(
            response.reviews.first().map(|r| r.user),
            Some(TEST_USER.uuid.into_uuid())
        );

        Ok(())
    }
}
