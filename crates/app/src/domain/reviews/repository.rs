//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    auth::models::UserUuid,
    domain::{
        menu_items::models::MenuItemUuid,
        reviews::models::{NewReview, Review, ReviewUpdate, ReviewUuid},
    },
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_REVIEWS_FOR_MENU_ITEM_SQL: &str = include_str!("sql/list_reviews_for_menu_item.sql");
const LIST_REVIEWS_FOR_USER_SQL: &str = include_str!("sql/list_reviews_for_user.sql");
const UPDATE_REVIEW_SQL: &str = include_str!("sql/update_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");
const HAS_COMPLETED_ORDER_WITH_ITEM_SQL: &str =
    include_str!("sql/has_completed_order_with_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ReviewUuid,
        user: UserUuid,
        review: &NewReview,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(CREATE_REVIEW_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(review.menu_item.into_uuid())
            .bind(i16::from(review.rating))
            .bind(review.comment.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews_for_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        menu_item: MenuItemUuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_REVIEWS_FOR_MENU_ITEM_SQL)
            .bind(menu_item.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_REVIEWS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Owner-scoped update; fails with `RowNotFound` when the review does
    /// not exist or belongs to someone else.
    pub(crate) async fn update_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ReviewUuid,
        user: UserUuid,
        update: &ReviewUpdate,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(UPDATE_REVIEW_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(i16::from(update.rating))
            .bind(update.comment.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Owner-scoped delete. Returns the number of rows removed.
    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: ReviewUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REVIEW_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn has_completed_order_with_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(HAS_COMPLETED_ORDER_WITH_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(menu_item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Review {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            user_name: row.try_get("user_name")?,
            menu_item: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            rating: try_get_rating(row, "rating")?,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_rating(row: &PgRow, col: &str) -> Result<u8, sqlx::Error> {
    let rating_i16: i16 = row.try_get(col)?;

    u8::try_from(rating_i16).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
