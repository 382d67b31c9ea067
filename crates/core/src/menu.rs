//! Menu catalog types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu item identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// Short description shown on the menu card.
    pub description: String,

    /// Unit price.
    pub price: Decimal,

    /// Image location.
    pub image_url: String,

    /// Free-text category ("burgers", "pizza", ...).
    pub category: String,

    /// Whether the item can currently be ordered.
    pub availability: bool,
}
