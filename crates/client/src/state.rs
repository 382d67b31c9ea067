//! Session state and persistence glue
//!
//! [`SessionState`] is plain data; mutations go through the pure
//! [`mensa::cart::CartState`] reducers. Persistence is explicit:
//! [`save_cart`] after every mutation, [`load_cart`] on init and on
//! identity changes.

use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use mensa::cart::{AppliedCoupon, CartLine, CartState, ShippingAddress};

use crate::{
    api::Profile,
    storage::{
        ALL_KEYS, CART_ITEMS_KEY, COUPON_KEY, LocalStore, PAYMENT_METHOD_KEY,
        SHIPPING_ADDRESS_KEY, scoped_key,
    },
};

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Profile as the server reported it at sign-in.
    pub profile: Profile,

    /// Bearer token for API calls.
    pub token: String,
}

/// The full client-side session: who is signed in, and their cart.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Signed-in identity; `None` for guests.
    pub identity: Option<Identity>,

    /// The active cart.
    pub cart: CartState,
}

impl SessionState {
    /// UUID scoping the storage keys, `None` for guests.
    #[must_use]
    pub fn storage_scope(&self) -> Option<Uuid> {
        self.identity.as_ref().map(|identity| identity.profile.uuid)
    }
}

/// Load the cart persisted under `user`'s keys (guest keys for `None`).
///
/// Unreadable values are dropped with a warning rather than failing the
/// whole load; local storage may hold output of older clients.
pub fn load_cart(store: &dyn LocalStore, user: Option<Uuid>) -> CartState {
    let mut cart = CartState::default();

    if let Some(raw) = store.get(&scoped_key(CART_ITEMS_KEY, user)) {
        match serde_json::from_str::<Vec<CartLine>>(&raw) {
            Ok(lines) => cart.lines = lines,
            Err(error) => warn!("discarding unreadable cart lines: {error}"),
        }
    }

    if let Some(raw) = store.get(&scoped_key(SHIPPING_ADDRESS_KEY, user)) {
        match serde_json::from_str::<ShippingAddress>(&raw) {
            Ok(shipping) => cart.shipping = Some(shipping),
            Err(error) => warn!("discarding unreadable shipping address: {error}"),
        }
    }

    if let Some(method) = store.get(&scoped_key(PAYMENT_METHOD_KEY, user)) {
        cart.payment_method = Some(method);
    }

    if let Some(raw) = store.get(&scoped_key(COUPON_KEY, user)) {
        match serde_json::from_str::<AppliedCoupon>(&raw) {
            Ok(coupon) => cart.coupon = Some(coupon),
            Err(error) => warn!("discarding unreadable coupon: {error}"),
        }
    }

    cart
}

/// Persist the cart under `user`'s keys (guest keys for `None`).
///
/// Absent components remove their key so a cleared coupon does not
/// resurrect on the next load.
pub fn save_cart(store: &mut dyn LocalStore, user: Option<Uuid>, cart: &CartState) {
    store.set(
        &scoped_key(CART_ITEMS_KEY, user),
        &json!(cart.lines).to_string(),
    );

    match &cart.shipping {
        Some(shipping) => store.set(
            &scoped_key(SHIPPING_ADDRESS_KEY, user),
            &json!(shipping).to_string(),
        ),
        None => store.remove(&scoped_key(SHIPPING_ADDRESS_KEY, user)),
    }

    match &cart.payment_method {
        Some(method) => store.set(&scoped_key(PAYMENT_METHOD_KEY, user), method),
        None => store.remove(&scoped_key(PAYMENT_METHOD_KEY, user)),
    }

    match &cart.coupon {
        Some(coupon) => store.set(&scoped_key(COUPON_KEY, user), &json!(coupon).to_string()),
        None => store.remove(&scoped_key(COUPON_KEY, user)),
    }
}

/// Delete every key persisted under `user`'s scope.
pub fn clear_cart_keys(store: &mut dyn LocalStore, user: Option<Uuid>) {
    for key in ALL_KEYS {
        store.remove(&scoped_key(key, user));
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::storage::MemoryStore;

    use super::*;

    fn line(quantity: u32) -> CartLine {
        CartLine {
            menu_item: Uuid::from_u128(1),
            name: "Classic Burger".to_string(),
            price: Decimal::new(200, 0),
            image_url: "/images/burger.jpg".to_string(),
            quantity,
            instructions: None,
        }
    }

    #[test]
    fn cart_round_trips_through_the_store() {
        let mut store = MemoryStore::new();
        let mut cart = CartState::default();

        cart.add_line(line(2));
        cart.save_payment_method("card");
        cart.apply_coupon(AppliedCoupon {
            code: "WELCOME10".to_string(),
            discount_percent: Decimal::new(10, 0),
        });

        save_cart(&mut store, None, &cart);
        let loaded = load_cart(&store, None);

        assert_eq!(loaded, cart);
    }

    #[test]
    fn scopes_do_not_leak_into_each_other() {
        let user = Uuid::from_u128(9);
        let mut store = MemoryStore::new();
        let mut cart = CartState::default();

        cart.add_line(line(1));
        save_cart(&mut store, Some(user), &cart);

        assert!(
            load_cart(&store, None).is_empty(),
            "guest scope must not see the identity cart"
        );
        assert_eq!(load_cart(&store, Some(user)), cart);
    }

    #[test]
    fn removed_coupon_does_not_resurrect() {
        let mut store = MemoryStore::new();
        let mut cart = CartState::default();

        cart.apply_coupon(AppliedCoupon {
            code: "WELCOME10".to_string(),
            discount_percent: Decimal::new(10, 0),
        });
        save_cart(&mut store, None, &cart);

        cart.remove_coupon();
        save_cart(&mut store, None, &cart);

        assert!(load_cart(&store, None).coupon.is_none());
    }

    #[test]
    fn unreadable_lines_are_dropped_not_fatal() {
        let mut store = MemoryStore::new();

        store.set(CART_ITEMS_KEY, "not json");

        assert!(load_cart(&store, None).is_empty());
    }

    #[test]
    fn clear_cart_keys_removes_the_whole_scope() {
        let mut store = MemoryStore::new();
        let mut cart = CartState::default();

        cart.add_line(line(1));
        cart.save_payment_method("cash");
        save_cart(&mut store, None, &cart);

        clear_cart_keys(&mut store, None);

        assert!(load_cart(&store, None).is_empty());
        assert!(load_cart(&store, None).payment_method.is_none());
    }
}
