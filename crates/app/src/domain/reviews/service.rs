//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        menu_items::models::MenuItemUuid,
        reviews::{
            errors::ReviewsServiceError,
            models::{NewReview, Review, ReviewUpdate, ReviewUuid},
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let eligible = self
            .repository
            .has_completed_order_with_item(&mut tx, user, review.menu_item)
            .await?;

        if !eligible {
            return Err(ReviewsServiceError::NotEligible);
        }

        let created = self
            .repository
            .create_review(&mut tx, ReviewUuid::now_v7(), user, &review)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_reviews_for_menu_item(
        &self,
        menu_item: MenuItemUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_reviews_for_menu_item(&mut tx, menu_item)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_reviews_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_reviews_for_user(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn update_review(
        &self,
        uuid: ReviewUuid,
        user: UserUuid,
        update: ReviewUpdate,
    ) -> Result<Review, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_review(&mut tx, uuid, user, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_review(
        &self,
        uuid: ReviewUuid,
        user: UserUuid,
    ) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_review(&mut tx, uuid, user).await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Leave a review for a menu item the user has received in a completed
    /// order.
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// List a menu item's reviews, newest first.
    async fn list_reviews_for_menu_item(
        &self,
        menu_item: MenuItemUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// List a user's own reviews, newest first.
    async fn list_reviews_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Revise a review the user wrote.
    async fn update_review(
        &self,
        uuid: ReviewUuid,
        user: UserUuid,
        update: ReviewUpdate,
    ) -> Result<Review, ReviewsServiceError>;

    /// Remove a review the user wrote.
    async fn delete_review(&self, uuid: ReviewUuid, user: UserUuid)
    -> Result<(), ReviewsServiceError>;
}
