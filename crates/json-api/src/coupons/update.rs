//! Update Coupon Handler

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

use mensa_app::domain::coupons::models::CouponUpdate;

use crate::{
    coupons::{errors::into_status_error, get::CouponResponse},
    extensions::*,
    state::State,
};

/// Update Coupon Request; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCouponRequest {
    /// Percentage discount as a decimal string, 0 to 100
    #[serde(default)]
    pub discount_percent: Option<String>,

    #[serde(default)]
    pub valid_from: Option<String>,

    #[serde(default)]
    pub valid_until: Option<String>,

    #[serde(default)]
    pub active: Option<bool>,
}

impl UpdateCouponRequest {
    fn into_update(self) -> Result<CouponUpdate, StatusError> {
        let discount_percent = match self.discount_percent {
            Some(percent) => Some(percent.as_str().into_money("discount_percent")?),
            None => None,
        };

        let valid_from = match self.valid_from {
            Some(from) => Some(from.as_str().into_timestamp("valid_from")?),
            None => None,
        };

        let valid_until = match self.valid_until {
            Some(until) => Some(until.as_str().into_timestamp("valid_until")?),
            None => None,
        };

        Ok(CouponUpdate {
            discount_percent,
            valid_from,
            valid_until,
            active: self.active,
        })
    }
}

/// Update Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Update Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = state
        .app
        .coupons
        .update_coupon(uuid.into_inner().into(), json.into_inner().into_update()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}

#[cfg(test)]
mod tests {
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

        admin_service(state, Router::with_path("coupons/{uuid}").put(handler))
    }

    #[tokio::test]
    async fn test_update_deactivates_coupon() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_update_coupon()
            .once()
            .withf(move |u, update| {
                *u == uuid && update.active == Some(false) && update.discount_percent.is_none()
            })
            .return_once(move |u, _| Ok(make_coupon(u)));

        let response: CouponResponse =
            TestClient::put(format!("http://example.com/coupons/{uuid}"))
                .json(&json!({ "active": false }))
                .send(&make_service(coupons))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_coupon_returns_404() -> TestResult {
        let uuid = CouponUuid::now_v7();

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_update_coupon()
            .once()
            .return_once(|_, _| Err(CouponsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/coupons/{uuid}"))
            .json(&json!({ "active": false }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
