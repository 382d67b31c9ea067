//! Create Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mensa_app::domain::coupons::models::NewCoupon;

use crate::{
    coupons::{errors::into_status_error, get::CouponResponse},
    extensions::*,
    state::State,
};

fn default_active() -> bool {
    true
}

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    pub code: String,

    /// Percentage discount as a decimal string, 0 to 100
    pub discount_percent: String,

    /// Start of the redemption window, RFC 3339
    pub valid_from: String,

    /// End of the redemption window, RFC 3339
    pub valid_until: String,

    /// Defaults to active when omitted
    #[serde(default = "default_active")]
    pub active: bool,
}

impl CreateCouponRequest {
    fn into_new_coupon(self) -> Result<NewCoupon, StatusError> {
        Ok(NewCoupon {
            code: self.code,
            discount_percent: self.discount_percent.as_str().into_money("discount_percent")?,
            valid_from: self.valid_from.as_str().into_timestamp("valid_from")?,
            valid_until: self.valid_until.as_str().into_timestamp("valid_until")?,
            active: self.active,
        })
    }
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon code is already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .create_coupon(json.into_inner().into_new_coupon()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", coupon.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use mensa_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, models::CouponUuid,
    };

    use crate::test_helpers::{MockServices, admin_service};

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        let state = MockServices {
            coupons,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("coupons").post(handler))
    }

    #[tokio::test]
    async fn test_create_coupon_success() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .withf(|new| {
                new.code == "WELCOME10" && new.discount_percent == Decimal::new(10, 0) && new.active
            })
            .return_once(move |_| Ok(make_coupon(uuid)));

        let mut res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "WELCOME10",
                "discount_percent": "10",
                "valid_from": "1970-01-01T00:00:00Z",
                "valid_until": "1970-01-02T00:00:00Z",
            }))
            .send(&make_service(coupons))
            .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/coupons/{uuid}").as_str()));

        let body: CouponResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_code_returns_409() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_create_coupon()
            .once()
            .return_once(|_| Err(CouponsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "WELCOME10",
                "discount_percent": "10",
                "valid_from": "1970-01-01T00:00:00Z",
                "valid_until": "1970-01-02T00:00:00Z",
            }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_bad_timestamp_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/coupons")
            .json(&json!({
                "code": "WELCOME10",
                "discount_percent": "10",
                "valid_from": "yesterday",
                "valid_until": "1970-01-02T00:00:00Z",
            }))
            .send(&make_service(MockCouponsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
