//! Menu Item Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod errors;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mensa_app::domain::menu_items::models::{MenuItem, MenuItemUuid};
    use rust_decimal::Decimal;

    pub(super) fn make_menu_item(uuid: MenuItemUuid) -> MenuItem {
        MenuItem {
            uuid,
            name: "Classic Burger".to_string(),
            description: "Beef patty, brioche bun".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/classic-burger.jpg".to_string(),
            category: "burgers".to_string(),
            availability: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
