//! Get Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::domain::coupons::models::Coupon;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Coupon Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// The unique identifier of the coupon
    pub uuid: Uuid,

    /// The redemption code customers type in
    pub code: String,

    /// Percentage discount as a decimal string, 0 to 100
    pub discount_percent: String,

    /// Start of the redemption window
    pub valid_from: String,

    /// End of the redemption window
    pub valid_until: String,

    /// Whether the coupon is switched on
    pub active: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        CouponResponse {
            uuid: coupon.uuid.into(),
            code: coupon.code,
            discount_percent: coupon.discount_percent.to_string(),
            valid_from: coupon.valid_from.to_string(),
            valid_until: coupon.valid_until.to_string(),
            active: coupon.active,
            created_at: coupon.created_at.to_string(),
            updated_at: coupon.updated_at.to_string(),
        }
    }
}

/// Get Coupon Handler
///
/// Returns a coupon.
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The coupon"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .get_coupon(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, models::CouponUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, admin_service};

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        let state = MockServices {
            coupons,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("coupons/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_coupon_success() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |u| Ok(make_coupon(u)));

        let response: CouponResponse =
            TestClient::get(format!("http://example.com/coupons/{uuid}"))
                .send(&make_service(coupons))
                .await
                .take_json()
                .await?;

        assert_eq!(response.code, "WELCOME10");
        assert_eq!(response.discount_percent, "10");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_coupon_returns_404() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_get_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/coupons/{uuid}"))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
