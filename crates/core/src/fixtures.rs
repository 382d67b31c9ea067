//! Demo catalog fixtures
//!
//! A small static menu used by the client's disconnected demo mode and by
//! the seeding CLI. UUIDs are stable so carts persisted against the demo
//! catalog survive restarts.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::menu::MenuItem;

/// Stable identifier of the demo Classic Burger.
pub const DEMO_BURGER_UUID: Uuid = Uuid::from_u128(0x11);

/// Stable identifier of the demo Margherita Pizza.
pub const DEMO_PIZZA_UUID: Uuid = Uuid::from_u128(0x12);

/// Stable identifier of the demo Shawarma Wrap.
pub const DEMO_SHAWARMA_UUID: Uuid = Uuid::from_u128(0x13);

/// Stable identifier of the demo Creamy Pasta.
pub const DEMO_PASTA_UUID: Uuid = Uuid::from_u128(0x14);

/// Stable identifier of the demo Mango Lassi.
pub const DEMO_LASSI_UUID: Uuid = Uuid::from_u128(0x15);

/// The static demo menu.
#[must_use]
pub fn demo_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            uuid: DEMO_BURGER_UUID,
            name: "Classic Burger".to_string(),
            description: "Flame-grilled beef patty with cheddar and house sauce".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/burger.jpg".to_string(),
            category: "burgers".to_string(),
            availability: true,
        },
        MenuItem {
            uuid: DEMO_PIZZA_UUID,
            name: "Margherita Pizza".to_string(),
            description: "Wood-fired with buffalo mozzarella and basil".to_string(),
            price: Decimal::new(400, 0),
            image_url: "/images/pizza.jpg".to_string(),
            category: "pizza".to_string(),
            availability: true,
        },
        MenuItem {
            uuid: DEMO_SHAWARMA_UUID,
            name: "Shawarma Wrap".to_string(),
            description: "Spit-roasted chicken, garlic sauce, pickles".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/shawarma.jpg".to_string(),
            category: "wraps".to_string(),
            availability: true,
        },
        MenuItem {
            uuid: DEMO_PASTA_UUID,
            name: "Creamy Pasta".to_string(),
            description: "Penne in a parmesan cream sauce with mushrooms".to_string(),
            price: Decimal::new(250, 0),
            image_url: "/images/pasta.jpg".to_string(),
            category: "pasta".to_string(),
            availability: true,
        },
        MenuItem {
            uuid: DEMO_LASSI_UUID,
            name: "Mango Lassi".to_string(),
            description: "Chilled yoghurt drink with Alphonso mango".to_string(),
            price: Decimal::new(80, 0),
            image_url: "/images/lassi.jpg".to_string(),
            category: "drinks".to_string(),
            availability: true,
        },
    ]
}

/// Look up a demo item by UUID.
#[must_use]
pub fn demo_item(uuid: Uuid) -> Option<MenuItem> {
    demo_menu().into_iter().find(|item| item.uuid == uuid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_menu_has_distinct_uuids() {
        let menu = demo_menu();
        let mut uuids: Vec<Uuid> = menu.iter().map(|item| item.uuid).collect();

        uuids.sort();
        uuids.dedup();

        assert_eq!(uuids.len(), menu.len(), "fixture uuids must be unique");
    }

    #[test]
    fn demo_item_finds_the_burger() {
        let item = demo_item(DEMO_BURGER_UUID);

        assert_eq!(item.map(|item| item.price), Some(Decimal::new(200, 0)));
    }
}
