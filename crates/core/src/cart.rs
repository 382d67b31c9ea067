//! Cart state and reducers
//!
//! The cart is plain data plus pure mutation methods. Callers own
//! persistence; nothing in here touches storage or the network.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::orders::DeliveryType;

/// A line in the cart, keyed by menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item this line refers to.
    pub menu_item: Uuid,

    /// Item name snapshot.
    pub name: String,

    /// Unit price snapshot.
    pub price: Decimal,

    /// Image location snapshot.
    pub image_url: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Optional preparation notes ("no onions").
    pub instructions: Option<String>,
}

/// Delivery destination details captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Delivery or pickup.
    pub delivery_type: DeliveryType,

    /// Street address; empty for pickup.
    pub address: String,

    /// City; empty for pickup.
    pub city: String,

    /// Postal code; empty for pickup.
    pub postal_code: String,

    /// Contact phone number.
    pub phone: String,
}

/// A coupon the customer has applied to their cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    /// Coupon code as entered.
    pub code: String,

    /// Discount in percent points (0-100).
    pub discount_percent: Decimal,
}

/// Full client-side cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Cart lines, at most one per menu item.
    pub lines: Vec<CartLine>,

    /// Saved shipping details, if the customer reached checkout.
    pub shipping: Option<ShippingAddress>,

    /// Chosen payment method label.
    pub payment_method: Option<String>,

    /// Applied coupon, if any.
    pub coupon: Option<AppliedCoupon>,
}

impl CartState {
    /// Add a line to the cart.
    ///
    /// If a line for the same menu item already exists it is replaced
    /// wholesale with the incoming line; quantities are not summed.
    /// Adding the same line twice is therefore idempotent.
    pub fn add_line(&mut self, line: CartLine) {
        match self.lines.iter_mut().find(|l| l.menu_item == line.menu_item) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    /// Set the quantity of an existing line. Unknown items are ignored.
    pub fn set_quantity(&mut self, menu_item: Uuid, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_item == menu_item) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for the given menu item, if present.
    pub fn remove_line(&mut self, menu_item: Uuid) {
        self.lines.retain(|l| l.menu_item != menu_item);
    }

    /// Drop all lines, keeping shipping, payment method and coupon.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
    }

    /// Record shipping details.
    pub fn save_shipping(&mut self, shipping: ShippingAddress) {
        self.shipping = Some(shipping);
    }

    /// Record the chosen payment method.
    pub fn save_payment_method(&mut self, method: impl Into<String>) {
        self.payment_method = Some(method.into());
    }

    /// Apply a validated coupon, replacing any previous one.
    pub fn apply_coupon(&mut self, coupon: AppliedCoupon) {
        self.coupon = Some(coupon);
    }

    /// Drop the applied coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(menu_item: Uuid, quantity: u32) -> CartLine {
        CartLine {
            menu_item,
            name: "Classic Burger".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/burger.jpg".to_string(),
            quantity,
            instructions: None,
        }
    }

    #[test]
    fn add_line_appends_new_items() {
        let mut cart = CartState::default();

        cart.add_line(line(Uuid::from_u128(1), 1));
        cart.add_line(line(Uuid::from_u128(2), 2));

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn add_line_replaces_existing_item_instead_of_summing() {
        let item = Uuid::from_u128(1);
        let mut cart = CartState::default();

        cart.add_line(line(item, 1));
        cart.add_line(line(item, 3));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_quantity(), 3, "quantity replaced, not summed");
    }

    #[test]
    fn add_line_is_idempotent() {
        let item = Uuid::from_u128(1);
        let mut cart = CartState::default();

        cart.add_line(line(item, 2));
        let once = cart.clone();
        cart.add_line(line(item, 2));

        assert_eq!(cart, once, "re-adding an identical line changes nothing");
    }

    #[test]
    fn set_quantity_ignores_unknown_items() {
        let mut cart = CartState::default();

        cart.add_line(line(Uuid::from_u128(1), 1));
        cart.set_quantity(Uuid::from_u128(9), 5);

        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn remove_line_leaves_other_lines() {
        let mut cart = CartState::default();

        cart.add_line(line(Uuid::from_u128(1), 1));
        cart.add_line(line(Uuid::from_u128(2), 1));
        cart.remove_line(Uuid::from_u128(1));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(
            cart.lines.first().map(|l| l.menu_item),
            Some(Uuid::from_u128(2))
        );
    }

    #[test]
    fn clear_lines_keeps_coupon_and_shipping() {
        let mut cart = CartState::default();

        cart.add_line(line(Uuid::from_u128(1), 1));
        cart.apply_coupon(AppliedCoupon {
            code: "WELCOME10".to_string(),
            discount_percent: Decimal::new(10, 0),
        });
        cart.clear_lines();

        assert!(cart.is_empty());
        assert!(cart.coupon.is_some());
    }
}
