//! Menu Item Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItem>;

/// Menu Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub uuid: MenuItemUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub availability: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Menu Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub availability: bool,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub availability: Option<bool>,
}
