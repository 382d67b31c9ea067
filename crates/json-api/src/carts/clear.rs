//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
///
/// Drops every line in the authenticated user's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .carts
        .clear_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::OK);

    Ok(())
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::carts::MockCartsService;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, TEST_USER, user_service};

    use super::*;

    #[tokio::test]
    async fn test_clear_cart_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER.uuid)
            .return_once(|_| Ok(()));

        let state = MockServices {
            carts,
            ..MockServices::default()
        }
        .into_state();

        let res = TestClient::delete("http://example.com/cart")
            .send(&user_service(
                state,
                Router::with_path("cart").delete(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
