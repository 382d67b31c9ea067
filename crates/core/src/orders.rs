//! Order assembly policy

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Courier delivery to a shipping address.
    Delivery,

    /// Customer collects at the counter.
    Pickup,
}

impl DeliveryType {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Pickup => "pickup",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "delivery" => Ok(Self::Delivery),
            "pickup" => Ok(Self::Pickup),
            _ => Err(UnknownVariant),
        }
    }
}

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen.
    Pending,

    /// Being prepared.
    Processing,

    /// Handed over to the customer.
    Completed,

    /// Abandoned; excluded from sales reports.
    Cancelled,
}

impl OrderStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownVariant),
        }
    }
}

/// Parse error for enum storage representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown variant")]
pub struct UnknownVariant;

/// An immutable order line snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item the line was priced from.
    pub menu_item: Uuid,

    /// Item name at order time.
    pub name: String,

    /// Unit price at order time.
    pub price: Decimal,

    /// Quantity ordered.
    pub quantity: u32,

    /// Optional preparation notes.
    pub instructions: Option<String>,
}

/// What order creation should do to the server-side cart afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartDisposition {
    /// Lines came from the request; the cart is left alone.
    Untouched,

    /// Lines were materialized from the cart; it must be cleared.
    Cleared,
}

/// Neither the request nor the cart provided any lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order has no lines")]
pub struct EmptyOrder;

/// Pick the lines a new order is built from.
///
/// A non-empty request list wins and the server cart is left untouched.
/// An empty request falls back to the cart snapshot, which must then be
/// cleared by the caller. If both sources are empty the order cannot
/// exist and the caller must roll back whatever it already created.
///
/// # Errors
///
/// [`EmptyOrder`] when both the request and the cart are empty.
pub fn resolve_order_lines(
    requested: Vec<OrderLine>,
    cart: Vec<OrderLine>,
) -> Result<(Vec<OrderLine>, CartDisposition), EmptyOrder> {
    if !requested.is_empty() {
        return Ok((requested, CartDisposition::Untouched));
    }

    if cart.is_empty() {
        return Err(EmptyOrder);
    }

    Ok((cart, CartDisposition::Cleared))
}

/// Estimated handover time: 45 minutes for delivery, 20 for pickup.
#[must_use]
pub fn delivery_eta(placed_at: Timestamp, delivery_type: DeliveryType) -> Timestamp {
    let minutes = match delivery_type {
        DeliveryType::Delivery => 45,
        DeliveryType::Pickup => 20,
    };

    placed_at
        .saturating_add(SignedDuration::from_mins(minutes))
        .unwrap_or(Timestamp::MAX)
}
