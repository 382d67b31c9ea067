//! Coupon validity

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A percentage-off coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon identifier.
    pub uuid: Uuid,

    /// Redemption code, unique, matched case-insensitively.
    pub code: String,

    /// Discount in percent points (0-100).
    pub discount_percent: Decimal,

    /// Start of the validity window.
    pub valid_from: Timestamp,

    /// End of the validity window, inclusive.
    pub valid_until: Timestamp,

    /// Kill switch; an inactive coupon never validates.
    pub active: bool,
}

/// Why a coupon did or did not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponValidity {
    /// Redeemable right now.
    Valid,

    /// Deactivated by an administrator.
    Disabled,

    /// The validity window has not opened yet.
    NotYetActive,

    /// The validity window has closed.
    Expired,
}

impl Coupon {
    /// Whether the coupon is redeemable at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.validity_at(now) == CouponValidity::Valid
    }

    /// Detailed validity verdict at `now`.
    #[must_use]
    pub fn validity_at(&self, now: Timestamp) -> CouponValidity {
        if !self.active {
            return CouponValidity::Disabled;
        }

        if now < self.valid_from {
            return CouponValidity::NotYetActive;
        }

        if now > self.valid_until {
            return CouponValidity::Expired;
        }

        CouponValidity::Valid
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn coupon(active: bool) -> Coupon {
        let day = SignedDuration::from_hours(24);

        Coupon {
            uuid: Uuid::from_u128(1),
            code: "WELCOME10".to_string(),
            discount_percent: Decimal::new(10, 0),
            valid_from: Timestamp::UNIX_EPOCH,
            valid_until: Timestamp::UNIX_EPOCH.saturating_add(day).unwrap_or(Timestamp::MAX),
            active,
        }
    }

    #[test]
    fn coupon_inside_its_window_is_valid() {
        let now = Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_hours(1)).unwrap_or(Timestamp::MAX);

        assert!(coupon(true).is_valid_at(now));
    }

    #[test]
    fn inactive_coupon_is_rejected_even_inside_the_window() {
        let now = Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_hours(1)).unwrap_or(Timestamp::MAX);

        assert_eq!(coupon(false).validity_at(now), CouponValidity::Disabled);
    }

    #[test]
    fn expired_coupon_is_rejected() {
        let now = Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_hours(48)).unwrap_or(Timestamp::MAX);

        assert_eq!(coupon(true).validity_at(now), CouponValidity::Expired);
    }

    #[test]
    fn coupon_before_its_window_is_rejected() {
        let now = Timestamp::UNIX_EPOCH.saturating_sub(SignedDuration::from_hours(1)).unwrap_or(Timestamp::MIN);

        assert_eq!(coupon(true).validity_at(now), CouponValidity::NotYetActive);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let coupon = coupon(true);

        assert!(coupon.is_valid_at(coupon.valid_from));
        assert!(coupon.is_valid_at(coupon.valid_until));
    }
}
