//! Order Items Repository

use mensa::orders::OrderLine;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::repository::{bind_quantity, try_get_quantity},
    orders::models::OrderUuid,
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &OrderLine,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(order.into_uuid())
            .bind(line.menu_item)
            .bind(&line.name)
            .bind(line.price)
            .bind(bind_quantity(line.quantity)?)
            .bind(line.instructions.as_deref())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        let rows = query_as::<Postgres, OrderLineRow>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }
}

/// Local wrapper so the pure domain line can be decoded from a row.
pub(crate) struct OrderLineRow(pub(crate) OrderLine);

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(OrderLine {
            menu_item: row.try_get("menu_item_uuid")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: try_get_quantity(row, "quantity")?,
            instructions: row.try_get("instructions")?,
        }))
    }
}
