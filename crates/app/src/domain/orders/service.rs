//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mensa::orders::{CartDisposition, OrderLine, OrderStatus, resolve_order_lines};
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    database::Db,
    domain::{
        carts::repository::PgCartItemsRepository,
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    cart_items: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            cart_items: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let uuid = OrderUuid::now_v7();
        let eta = mensa::orders::delivery_eta(Timestamp::now(), order.delivery_type);

        let mut created = self
            .orders
            .create_order(&mut tx, uuid, user, &order, eta)
            .await?;

        let cart_lines = if order.lines.is_empty() {
            self.cart_items
                .get_cart_items(&mut tx, user)
                .await?
                .into_iter()
                .map(|item| OrderLine {
                    menu_item: item.menu_item.into_uuid(),
                    name: item.name,
                    price: item.price,
                    quantity: item.quantity,
                    instructions: item.instructions,
                })
                .collect()
        } else {
            Vec::new()
        };

        let resolved = resolve_order_lines(order.lines, cart_lines);

        let (lines, disposition) = match resolved {
            Ok(resolved) => resolved,
            Err(_) => {
                // The provisional row must not survive an empty order.
                self.orders.delete_order(&mut tx, uuid).await?;
                tx.commit().await?;

                return Err(OrdersServiceError::EmptyOrder);
            }
        };

        for line in &lines {
            self.items.create_order_item(&mut tx, uuid, line).await?;
        }

        if disposition == CartDisposition::Cleared {
            self.cart_items.clear_cart(&mut tx, user).await?;
        }

        tx.commit().await?;

        created.lines = lines;

        tracing::info!(order = %created.uuid, "order placed");

        Ok(created)
    }

    async fn get_order(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.get_order(&mut tx, uuid).await?;
        order.lines = self.items.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders.list_orders_for_user(&mut tx, user).await?;

        for order in &mut orders {
            order.lines = self.items.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders.list_orders(&mut tx).await?;

        for order in &mut orders {
            order.lines = self.items.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.update_order_status(&mut tx, uuid, status).await?;
        order.lines = self.items.get_order_items(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for a user.
    ///
    /// Lines supplied with the order win; an empty list falls back to the
    /// user's server cart, which is then cleared.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order with its lines.
    async fn get_order(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// List a user's orders, newest first.
    async fn list_orders_for_user(&self, user: UserUuid)
    -> Result<Vec<Order>, OrdersServiceError>;

    /// List every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order to a new lifecycle state.
    async fn update_order_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
