//! Menu Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::menu_items::models::{MenuItem, MenuItemUpdate, MenuItemUuid, NewMenuItem};

const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const LIST_MENU_ITEMS_BY_CATEGORY_SQL: &str = include_str!("sql/list_menu_items_by_category.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMenuItemsRepository;

impl PgMenuItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<&str>,
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        match category {
            Some(category) => {
                query_as::<Postgres, MenuItem>(LIST_MENU_ITEMS_BY_CATEGORY_SQL)
                    .bind(category)
                    .fetch_all(&mut **tx)
                    .await
            }
            None => {
                query_as::<Postgres, MenuItem>(LIST_MENU_ITEMS_SQL)
                    .fetch_all(&mut **tx)
                    .await
            }
        }
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(GET_MENU_ITEM_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
        item: &NewMenuItem,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(CREATE_MENU_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.image_url)
            .bind(&item.category)
            .bind(item.availability)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
        update: &MenuItemUpdate,
    ) -> Result<MenuItem, sqlx::Error> {
        query_as::<Postgres, MenuItem>(UPDATE_MENU_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price)
            .bind(update.image_url.as_deref())
            .bind(update.category.as_deref())
            .bind(update.availability)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            category: row.try_get("category")?,
            availability: row.try_get("availability")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
