//! Cart Handlers
//!
//! All cart routes operate on the authenticated user's own cart.

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod errors;
pub(crate) mod get;
pub(crate) mod remove_item;
pub(crate) mod sync;
pub(crate) mod update_item;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mensa_app::domain::{carts::models::CartItem, menu_items::models::MenuItemUuid};
    use rust_decimal::Decimal;

    pub(super) fn make_cart_item(menu_item: MenuItemUuid) -> CartItem {
        CartItem {
            menu_item,
            name: "Classic Burger".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/classic-burger.jpg".to_string(),
            quantity: 2,
            instructions: Some("no onions".to_string()),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
