//! Coupon Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod errors;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;
pub(crate) mod validate;

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use mensa_app::domain::coupons::models::{Coupon, CouponUuid};
    use rust_decimal::Decimal;

    pub(super) fn make_coupon(uuid: CouponUuid) -> Coupon {
        Coupon {
            uuid,
            code: "WELCOME10".to_string(),
            discount_percent: Decimal::new(10, 0),
            valid_from: Timestamp::UNIX_EPOCH,
            valid_until: Timestamp::UNIX_EPOCH.saturating_add(SignedDuration::from_hours(24)).unwrap_or(Timestamp::MAX),
            active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
