//! Orders Repository

use std::str::FromStr;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mensa::orders::OrderStatus;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    domain::orders::models::{NewOrder, Order, OrderUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("../sql/list_orders_for_user.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        user: UserUuid,
        order: &NewOrder,
        eta: Timestamp,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(OrderStatus::Pending.as_str())
            .bind(order.delivery_type.as_str())
            .bind(&order.payment_method)
            .bind(order.address.as_deref())
            .bind(order.city.as_deref())
            .bind(order.postal_code.as_deref())
            .bind(&order.phone)
            .bind(order.items_price)
            .bind(order.tax_price)
            .bind(order.delivery_price)
            .bind(order.discount)
            .bind(order.total_price)
            .bind(order.coupon_code.as_deref())
            .bind(SqlxTimestamp::from(eta))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(uuid.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status: try_get_parsed(row, "status")?,
            delivery_type: try_get_parsed(row, "delivery_type")?,
            payment_method: row.try_get("payment_method")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            postal_code: row.try_get("postal_code")?,
            phone: row.try_get("phone")?,
            items_price: row.try_get("items_price")?,
            tax_price: row.try_get("tax_price")?,
            delivery_price: row.try_get("delivery_price")?,
            discount: row.try_get("discount")?,
            total_price: row.try_get("total_price")?,
            coupon_code: row.try_get("coupon_code")?,
            eta: row.try_get::<SqlxTimestamp, _>("eta")?.to_jiff(),
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    T::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
