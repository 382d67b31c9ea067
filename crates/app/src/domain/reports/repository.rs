//! Reports Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mensa::{orders::OrderLine, reports::CompletedOrder};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::carts::repository::try_get_quantity;

const COMPLETED_ORDERS_BETWEEN_SQL: &str = include_str!("sql/completed_orders_between.sql");
const COMPLETED_ORDER_LINES_BETWEEN_SQL: &str =
    include_str!("sql/completed_order_lines_between.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn completed_orders_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<CompletedOrder>, sqlx::Error> {
        let rows = query_as::<Postgres, CompletedOrderRow>(COMPLETED_ORDERS_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    pub(crate) async fn completed_order_lines_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        let rows = query_as::<Postgres, ReportLineRow>(COMPLETED_ORDER_LINES_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }
}

struct CompletedOrderRow(CompletedOrder);

impl<'r> FromRow<'r, PgRow> for CompletedOrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(CompletedOrder {
            total_price: row.try_get("total_price")?,
            placed_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        }))
    }
}

struct ReportLineRow(OrderLine);

impl<'r> FromRow<'r, PgRow> for ReportLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self(OrderLine {
            menu_item: row.try_get("menu_item_uuid")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            quantity: try_get_quantity(row, "quantity")?,
            instructions: None,
        }))
    }
}
