//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    domain::{
        carts::models::{CartItem, CartItemUpdate, NewCartItem},
        menu_items::models::MenuItemUuid,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const INSERT_KNOWN_CART_ITEM_SQL: &str = include_str!("sql/insert_known_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert a line, summing quantity into an existing row for the same
    /// menu item.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &NewCartItem,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(item.menu_item.into_uuid())
            .bind(bind_quantity(item.quantity)?)
            .bind(item.instructions.as_deref())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Insert a line only when the menu item exists. Returns the number of
    /// rows written (0 when the item is unknown).
    pub(crate) async fn insert_known_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: &NewCartItem,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INSERT_KNOWN_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(item.menu_item.into_uuid())
            .bind(bind_quantity(item.quantity)?)
            .bind(item.instructions.as_deref())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        menu_item: MenuItemUuid,
        update: &CartItemUpdate,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(menu_item.into_uuid())
            .bind(bind_quantity(update.quantity)?)
            .bind(update.instructions.as_deref())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(menu_item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            menu_item: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            image_url: row.try_get("image_url")?,
            quantity: try_get_quantity(row, "quantity")?,
            instructions: row.try_get("instructions")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn bind_quantity(quantity: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(quantity).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
