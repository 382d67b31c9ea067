//! Order Models

use jiff::Timestamp;
use mensa::orders::{DeliveryType, OrderLine, OrderStatus};
use rust_decimal::Decimal;

use crate::{auth::models::UserUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub status: OrderStatus,
    pub delivery_type: DeliveryType,
    pub payment_method: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone: String,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub delivery_price: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub coupon_code: Option<String>,
    pub eta: Timestamp,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Order Model
///
/// `lines` may be empty; order creation then falls back to the server
/// cart. The price breakdown arrives from the client and is stored as
/// submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub delivery_type: DeliveryType,
    pub payment_method: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone: String,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub delivery_price: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub coupon_code: Option<String>,
    pub lines: Vec<OrderLine>,
}
