//! Coupon Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<Coupon>;

/// Coupon Model
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon {
    pub uuid: CouponUuid,
    pub code: String,
    pub discount_percent: Decimal,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Coupon {
    /// Project onto the pure domain type for validity checks.
    #[must_use]
    pub fn to_domain(&self) -> mensa::coupons::Coupon {
        mensa::coupons::Coupon {
            uuid: self.uuid.into_uuid(),
            code: self.code.clone(),
            discount_percent: self.discount_percent,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            active: self.active,
        }
    }
}

/// New Coupon Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub code: String,
    pub discount_percent: Decimal,
    pub valid_from: Timestamp,
    pub valid_until: Timestamp,
    pub active: bool,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponUpdate {
    pub discount_percent: Option<Decimal>,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub active: Option<bool>,
}

/// Outcome of a redemption check.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponValidation {
    /// The coupon can be applied.
    Valid(Coupon),

    /// The coupon exists but is not redeemable right now.
    Rejected(mensa::coupons::CouponValidity),

    /// No coupon with that code.
    UnknownCode,
}
