//! Delete Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Delete Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Delete Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .coupons
        .delete_coupon(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::OK);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use mensa_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, models::CouponUuid,
    };

    use crate::test_helpers::{MockServices, admin_service};

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        let state = MockServices {
            coupons,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("coupons/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_coupon_success() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_delete_coupon()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_coupon_returns_404() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_delete_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
