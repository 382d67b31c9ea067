//! Coupons service.

use async_trait::async_trait;
use jiff::Timestamp;
use mensa::coupons::CouponValidity;
use mockall::automock;

use crate::{
    database::Db,
    domain::coupons::{
        errors::CouponsServiceError,
        models::{Coupon, CouponUpdate, CouponUuid, CouponValidation, NewCoupon},
        repository::PgCouponsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.repository.list_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn get_coupon(&self, uuid: CouponUuid) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self.repository.get_coupon(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_coupon(&mut tx, CouponUuid::now_v7(), &coupon)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_coupon(
        &self,
        uuid: CouponUuid,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_coupon(&mut tx, uuid, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_coupon(&self, uuid: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn validate_coupon(
        &self,
        code: String,
        now: Timestamp,
    ) -> Result<CouponValidation, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self.repository.find_coupon_by_code(&mut tx, &code).await?;

        tx.commit().await?;

        let Some(coupon) = coupon else {
            return Ok(CouponValidation::UnknownCode);
        };

        match coupon.to_domain().validity_at(now) {
            CouponValidity::Valid => Ok(CouponValidation::Valid(coupon)),
            verdict => Ok(CouponValidation::Rejected(verdict)),
        }
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// List all coupons, newest first.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Retrieve a single coupon.
    async fn get_coupon(&self, uuid: CouponUuid) -> Result<Coupon, CouponsServiceError>;

    /// Create a coupon with a unique code.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<Coupon, CouponsServiceError>;

    /// Apply a partial update to a coupon.
    async fn update_coupon(
        &self,
        uuid: CouponUuid,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError>;

    /// Remove a coupon.
    async fn delete_coupon(&self, uuid: CouponUuid) -> Result<(), CouponsServiceError>;

    /// Check whether `code` is redeemable at `now`.
    async fn validate_coupon(
        &self,
        code: String,
        now: Timestamp,
    ) -> Result<CouponValidation, CouponsServiceError>;
}
