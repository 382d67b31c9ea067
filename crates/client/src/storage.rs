//! Local persistence
//!
//! Browser-local storage modelled as a plain string key-value store.
//! Keys are either guest-scoped (bare) or identity-scoped (suffixed
//! with the signed-in user's UUID) so accounts sharing a device never
//! see each other's cart.

use std::collections::HashMap;

use uuid::Uuid;

/// Storage key for the serialized cart lines.
pub const CART_ITEMS_KEY: &str = "cart_items";

/// Storage key for the saved shipping address.
pub const SHIPPING_ADDRESS_KEY: &str = "shipping_address";

/// Storage key for the chosen payment method.
pub const PAYMENT_METHOD_KEY: &str = "payment_method";

/// Storage key for the applied coupon.
pub const COUPON_KEY: &str = "coupon";

/// Every key the client persists.
pub const ALL_KEYS: [&str; 4] = [
    CART_ITEMS_KEY,
    SHIPPING_ADDRESS_KEY,
    PAYMENT_METHOD_KEY,
    COUPON_KEY,
];

/// Scope a storage key to an identity. `None` yields the guest key.
#[must_use]
pub fn scoped_key(key: &str, user: Option<Uuid>) -> String {
    match user {
        Some(user) => format!("{key}:{user}"),
        None => key.to_string(),
    }
}

/// String key-value persistence, injected into the session.
pub trait LocalStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any existing one.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a value, if present.
    fn remove(&mut self, key: &str);
}

/// In-memory [`LocalStore`], used in tests and native shells.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_key_is_bare() {
        assert_eq!(scoped_key(CART_ITEMS_KEY, None), "cart_items");
    }

    #[test]
    fn identity_key_is_suffixed_with_the_user_uuid() {
        let user = Uuid::from_u128(7);

        assert_eq!(
            scoped_key(CART_ITEMS_KEY, Some(user)),
            format!("cart_items:{user}")
        );
    }

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryStore::new();

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }
}
