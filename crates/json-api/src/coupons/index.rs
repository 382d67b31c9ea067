//! Coupon Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    coupons::{errors::into_status_error, get::CouponResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    /// The list of coupons
    pub coupons: Vec<CouponResponse>,
}

/// Coupon Index Handler
///
/// Returns every coupon, newest first.
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .app
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}
