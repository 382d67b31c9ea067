//! Menu items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::menu_items::{
        errors::MenuItemsServiceError,
        models::{MenuItem, MenuItemUpdate, MenuItemUuid, NewMenuItem},
        repository::PgMenuItemsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMenuItemsService {
    db: Db,
    repository: PgMenuItemsRepository,
}

impl PgMenuItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuItemsRepository::new(),
        }
    }
}

#[async_trait]
impl MenuItemsService for PgMenuItemsService {
    async fn list_menu_items(
        &self,
        category: Option<String>,
    ) -> Result<Vec<MenuItem>, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_menu_items(&mut tx, category.as_deref())
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_menu_item(&self, uuid: MenuItemUuid) -> Result<MenuItem, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_menu_item(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItem, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_menu_item(&mut tx, MenuItemUuid::now_v7(), &item)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_menu_item(
        &self,
        uuid: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_menu_item(&mut tx, uuid, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_menu_item(&self, uuid: MenuItemUuid) -> Result<(), MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(MenuItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuItemsService: Send + Sync {
    /// List the menu, optionally restricted to one category.
    async fn list_menu_items(
        &self,
        category: Option<String>,
    ) -> Result<Vec<MenuItem>, MenuItemsServiceError>;

    /// Retrieve a single menu item.
    async fn get_menu_item(&self, uuid: MenuItemUuid) -> Result<MenuItem, MenuItemsServiceError>;

    /// Add a dish to the menu.
    async fn create_menu_item(&self, item: NewMenuItem)
    -> Result<MenuItem, MenuItemsServiceError>;

    /// Apply a partial update to a menu item.
    async fn update_menu_item(
        &self,
        uuid: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuItemsServiceError>;

    /// Remove a menu item.
    async fn delete_menu_item(&self, uuid: MenuItemUuid) -> Result<(), MenuItemsServiceError>;
}
