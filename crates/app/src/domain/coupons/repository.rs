//! Coupons Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::coupons::models::{Coupon, CouponUpdate, CouponUuid, NewCoupon};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/get_coupon.sql");
const FIND_COUPON_BY_CODE_SQL: &str = include_str!("sql/find_coupon_by_code.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/delete_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CouponUuid,
    ) -> Result<Coupon, sqlx::Error> {
        query_as::<Postgres, Coupon>(GET_COUPON_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_coupon_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(FIND_COUPON_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CouponUuid,
        coupon: &NewCoupon,
    ) -> Result<Coupon, sqlx::Error> {
        query_as::<Postgres, Coupon>(CREATE_COUPON_SQL)
            .bind(uuid.into_uuid())
            .bind(&coupon.code)
            .bind(coupon.discount_percent)
            .bind(SqlxTimestamp::from(coupon.valid_from))
            .bind(SqlxTimestamp::from(coupon.valid_until))
            .bind(coupon.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CouponUuid,
        update: &CouponUpdate,
    ) -> Result<Coupon, sqlx::Error> {
        query_as::<Postgres, Coupon>(UPDATE_COUPON_SQL)
            .bind(uuid.into_uuid())
            .bind(update.discount_percent)
            .bind(update.valid_from.map(SqlxTimestamp::from))
            .bind(update.valid_until.map(SqlxTimestamp::from))
            .bind(update.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Coupon {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CouponUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            discount_percent: row.try_get("discount_percent")?,
            valid_from: row.try_get::<SqlxTimestamp, _>("valid_from")?.to_jiff(),
            valid_until: row.try_get::<SqlxTimestamp, _>("valid_until")?.to_jiff(),
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
