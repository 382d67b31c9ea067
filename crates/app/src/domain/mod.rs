//! Mensa Domain Concerns

pub mod carts;
pub mod coupons;
pub mod menu_items;
pub mod orders;
pub mod reports;
pub mod reviews;
