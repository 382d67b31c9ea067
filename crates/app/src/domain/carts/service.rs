//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartItemUpdate, NewCartItem},
            repository::PgCartItemsRepository,
        },
        menu_items::models::MenuItemUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository
            .upsert_cart_item(&mut tx, user, &item)
            .await?;

        let items = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
        update: CartItemUpdate,
    ) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .update_cart_item(&mut tx, user, menu_item, &update)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let items = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, menu_item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let items = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn sync_cart(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<Vec<CartItem>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.items_repository.clear_cart(&mut tx, user).await?;

        // Wholesale replacement; lines referencing unknown menu items are
        // dropped rather than failing the whole sync.
        for item in &items {
            let written = self
                .items_repository
                .insert_known_cart_item(&mut tx, user, item)
                .await?;

            if written == 0 {
                tracing::debug!(menu_item = %item.menu_item, "skipping unknown menu item during cart sync");
            }
        }

        let synced = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(synced)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart, joined with current menu item details.
    async fn get_cart(&self, user: UserUuid) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Add a line; re-adding a menu item sums quantities into the
    /// existing row.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Set quantity and instructions on an existing line.
    async fn update_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
        update: CartItemUpdate,
    ) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Remove one line.
    async fn remove_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Drop every line in the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;

    /// Replace the cart wholesale with the given lines, skipping lines
    /// whose menu item no longer exists.
    async fn sync_cart(
        &self,
        user: UserUuid,
        items: Vec<NewCartItem>,
    ) -> Result<Vec<CartItem>, CartsServiceError>;
}
