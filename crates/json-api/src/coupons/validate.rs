//! Validate Coupon Handler

use std::sync::Arc;

use jiff::Timestamp;
use mensa::coupons::CouponValidity;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mensa_app::domain::coupons::models::CouponValidation;

use crate::{coupons::errors::into_status_error, extensions::*, state::State};

/// Validate Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateCouponRequest {
    /// The redemption code to check
    pub code: String,
}

/// Validate Coupon Response
///
/// A rejected coupon is a normal answer, not an error; the response is
/// always 200 with `valid` set accordingly.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidateCouponResponse {
    /// Whether the coupon can be applied right now
    pub valid: bool,

    /// Percentage discount as a decimal string, present when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<String>,

    /// Why the coupon was rejected, absent when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn rejection_reason(verdict: CouponValidity) -> String {
    match verdict {
        CouponValidity::Valid => "valid".to_string(),
        CouponValidity::Disabled => "This coupon has been deactivated".to_string(),
        CouponValidity::NotYetActive => "This coupon is not active yet".to_string(),
        CouponValidity::Expired => "This coupon has expired".to_string(),
    }
}

impl From<CouponValidation> for ValidateCouponResponse {
    fn from(validation: CouponValidation) -> Self {
        match validation {
            CouponValidation::Valid(coupon) => ValidateCouponResponse {
                valid: true,
                discount_percent: Some(coupon.discount_percent.to_string()),
                reason: None,
            },
            CouponValidation::Rejected(verdict) => ValidateCouponResponse {
                valid: false,
                discount_percent: None,
                reason: Some(rejection_reason(verdict)),
            },
            CouponValidation::UnknownCode => ValidateCouponResponse {
                valid: false,
                discount_percent: None,
                reason: Some("Unknown coupon code".to_string()),
            },
        }
    }
}

/// Validate Coupon Handler
///
/// Checks whether a coupon code is redeemable right now.
#[endpoint(
    tags("coupons"),
    summary = "Validate Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Validation verdict"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ValidateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<ValidateCouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let validation = state
        .app
        .coupons
        .validate_coupon(json.into_inner().code, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(validation.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::domain::coupons::{MockCouponsService, models::CouponUuid};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, user_service};

    use super::{super::tests::make_coupon, *};

    fn make_service(coupons: MockCouponsService) -> Service {
        let state = MockServices {
            coupons,
            ..MockServices::default()
        }
        .into_state();

        user_service(state, Router::with_path("coupons/validate").post(handler))
    }

    #[tokio::test]
    async fn test_valid_coupon_carries_discount() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .withf(|code, _now| *code == "WELCOME10")
            .return_once(|_, _| Ok(CouponValidation::Valid(make_coupon(CouponUuid::now_v7()))));

        let response: ValidateCouponResponse =
            TestClient::post("http://example.com/coupons/validate")
                .json(&json!({ "code": "WELCOME10" }))
                .send(&make_service(coupons))
                .await
                .take_json()
                .await?;

        assert!(response.valid);
        assert_eq!(response.discount_percent.as_deref(), Some("10"));
        assert!(response.reason.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_code_is_200_with_valid_false() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .return_once(|_, _| Ok(CouponValidation::UnknownCode));

        let mut res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({ "code": "NOPE" }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ValidateCouponResponse = res.take_json().await?;

        assert!(!body.valid);
        assert_eq!(body.reason.as_deref(), Some("Unknown coupon code"));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_coupon_is_200_with_reason() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_validate_coupon()
            .once()
            .return_once(|_, _| Ok(CouponValidation::Rejected(CouponValidity::Expired)));

        let mut res = TestClient::post("http://example.com/coupons/validate")
            .json(&json!({ "code": "WELCOME10" }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: ValidateCouponResponse = res.take_json().await?;

        assert!(!body.valid);
        assert_eq!(body.reason.as_deref(), Some("This coupon has expired"));

        Ok(())
    }
}
