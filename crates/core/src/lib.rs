//! Mensa
//!
//! Mensa is the shared ordering domain for the Mensa food platform: menu
//! catalog types, cart state and reducers, price breakdown arithmetic,
//! coupon validity, order-line resolution and sales reporting. This crate
//! is pure: no I/O, no async, no persistence.

pub mod cart;
pub mod coupons;
pub mod fixtures;
pub mod menu;
pub mod orders;
pub mod pricing;
pub mod reports;
