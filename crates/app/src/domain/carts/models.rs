//! Cart Models
//!
//! The server cart is one row per (user, menu item). Reads are joined
//! against `menu_items` so lines carry the current name, price and image.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::menu_items::models::MenuItemUuid;

/// Cart Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub price: Decimal,
    pub image_url: String,
    pub quantity: u32,
    pub instructions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Line Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub instructions: Option<String>,
}

/// Cart Line Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemUpdate {
    pub quantity: u32,
    pub instructions: Option<String>,
}
