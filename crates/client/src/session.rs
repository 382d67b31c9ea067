//! Session orchestration
//!
//! [`Session`] ties the API client, local persistence and cart state
//! together: every mutation runs the pure reducer, persists locally,
//! and, when signed in, pushes a best-effort sync to the server. Local
//! storage is the durable source of truth from the client's view; a
//! failed sync is logged and never rolls back the local change.

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use mensa::{
    cart::{CartLine, ShippingAddress},
    fixtures,
    menu::MenuItem,
    pricing::PriceBreakdown,
};

use crate::{
    api::{ApiClient, ApiError, OrderSubmission, PlacedOrder},
    state::{Identity, SessionState, clear_cart_keys, load_cart, save_cart},
    storage::LocalStore,
};

/// A failed session operation.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation requires a signed-in identity.
    #[error("not signed in")]
    NotSignedIn,

    /// The server rejected the coupon code.
    #[error("coupon rejected: {0}")]
    CouponRejected(String),

    /// Checkout cannot proceed without this detail.
    #[error("checkout details missing: {0}")]
    MissingCheckoutDetails(&'static str),

    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A live storefront session over an injected store and API client.
#[derive(Debug)]
pub struct Session<S: LocalStore> {
    api: ApiClient,
    store: S,
    state: SessionState,
}

impl<S: LocalStore> Session<S> {
    /// Start a guest session, hydrating the guest cart from `store`.
    pub fn new(api: ApiClient, store: S) -> Self {
        let state = SessionState {
            identity: None,
            cart: load_cart(&store, None),
        };

        Self { api, store, state }
    }

    /// The current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn persist(&mut self) {
        save_cart(
            &mut self.store,
            self.state.storage_scope(),
            &self.state.cart,
        );
    }

    /// Push the active cart to the server when signed in. Failure is
    /// logged; the local cart stays authoritative.
    async fn sync_to_server(&self) {
        if self.state.identity.is_none() {
            return;
        }

        if let Err(error) = self.api.sync_cart(&self.state.cart.lines).await {
            warn!("cart sync failed, keeping local state: {error}");
        }
    }

    /// Sign in and reconcile carts.
    ///
    /// A non-empty guest cart becomes the identity's cart by wholesale
    /// replacement and the guest keys are cleared; otherwise the
    /// identity's previously persisted cart is restored.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::Status`] 401 on bad credentials. The
    /// follow-up server cart sync is best-effort and never fails the
    /// sign-in.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        let authenticated = self.api.login(email, password).await?;

        let user = authenticated.user.uuid;
        let guest_cart = load_cart(&self.store, None);

        self.api.set_token(Some(authenticated.token.clone()));
        self.state.identity = Some(Identity {
            profile: authenticated.user,
            token: authenticated.token,
        });

        if guest_cart.is_empty() {
            self.state.cart = load_cart(&self.store, Some(user));
        } else {
            self.state.cart = guest_cart;
            save_cart(&mut self.store, Some(user), &self.state.cart);
            clear_cart_keys(&mut self.store, None);
        }

        self.sync_to_server().await;

        info!(user = %user, "signed in");

        Ok(())
    }

    /// Sign out, clearing the in-memory cart.
    ///
    /// The identity-scoped keys stay persisted for the next visit; the
    /// session returns to an empty guest cart.
    pub fn sign_out(&mut self) {
        self.persist();
        self.api.set_token(None);
        self.state.identity = None;
        self.state.cart = load_cart(&self.store, None);
    }

    /// Register a new account and sign the session in.
    ///
    /// # Errors
    ///
    /// Fails with a 409 [`ApiError::Status`] when the email is taken.
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SessionError> {
        let authenticated = self.api.register(name, email, password).await?;
        let user = authenticated.user.uuid;

        self.api.set_token(Some(authenticated.token.clone()));
        self.state.identity = Some(Identity {
            profile: authenticated.user,
            token: authenticated.token,
        });

        // New accounts adopt whatever the guest assembled pre-signup.
        let guest_cart = load_cart(&self.store, None);

        if !guest_cart.is_empty() {
            self.state.cart = guest_cart;
            save_cart(&mut self.store, Some(user), &self.state.cart);
            clear_cart_keys(&mut self.store, None);
            self.sync_to_server().await;
        }

        Ok(())
    }

    /// Add a menu item to the cart.
    ///
    /// Item details resolve in three tiers so the operation works even
    /// with the API down: live lookup, then the demo catalog, then a
    /// synthesized placeholder. An existing line for the same item is
    /// replaced, not summed.
    pub async fn add_to_cart(
        &mut self,
        menu_item: Uuid,
        quantity: u32,
        instructions: Option<String>,
    ) {
        let details = self.resolve_item(menu_item).await;

        self.state.cart.add_line(CartLine {
            menu_item,
            name: details.name,
            price: details.price,
            image_url: details.image_url,
            quantity,
            instructions,
        });

        self.persist();
        self.sync_to_server().await;
    }

    async fn resolve_item(&self, menu_item: Uuid) -> MenuItem {
        match self.api.get_menu_item(menu_item).await {
            Ok(item) => item,
            Err(error) => {
                warn!("live item lookup failed, falling back: {error}");

                fixtures::demo_item(menu_item).unwrap_or_else(|| placeholder_item(menu_item))
            }
        }
    }

    /// Set the quantity of an existing line. Unknown items are ignored.
    pub async fn set_quantity(&mut self, menu_item: Uuid, quantity: u32) {
        self.state.cart.set_quantity(menu_item, quantity);
        self.persist();
        self.sync_to_server().await;
    }

    /// Remove a line from the cart.
    pub async fn remove_from_cart(&mut self, menu_item: Uuid) {
        self.state.cart.remove_line(menu_item);
        self.persist();
        self.sync_to_server().await;
    }

    /// Record shipping details for checkout.
    pub fn save_shipping(&mut self, shipping: ShippingAddress) {
        self.state.cart.save_shipping(shipping);
        self.persist();
    }

    /// Record the chosen payment method.
    pub fn save_payment_method(&mut self, method: impl Into<String>) {
        self.state.cart.save_payment_method(method);
        self.persist();
    }

    /// Validate a coupon with the server and apply it locally.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotSignedIn`] for guests,
    /// [`SessionError::CouponRejected`] when the server says no.
    pub async fn apply_coupon(&mut self, code: &str) -> Result<(), SessionError> {
        if self.state.identity.is_none() {
            return Err(SessionError::NotSignedIn);
        }

        let verdict = self.api.validate_coupon(code).await?;
        let reason = verdict.reason.clone();

        match verdict.into_applied(code)? {
            Some(coupon) => {
                self.state.cart.apply_coupon(coupon);
                self.persist();

                Ok(())
            }
            None => Err(SessionError::CouponRejected(
                reason.unwrap_or_else(|| "coupon is not valid".to_string()),
            )),
        }
    }

    /// Drop the applied coupon. Local only; never re-validated.
    pub fn remove_coupon(&mut self) {
        self.state.cart.remove_coupon();
        self.persist();
    }

    /// Place an order from the current cart.
    ///
    /// The price breakdown is computed here and submitted with the
    /// materialized lines; on success the local cart lines and coupon
    /// are cleared (shipping and payment method are kept for reuse).
    ///
    /// # Errors
    ///
    /// [`SessionError::NotSignedIn`] for guests,
    /// [`SessionError::MissingCheckoutDetails`] without shipping or
    /// payment details, and [`ApiError`] variants from the API call.
    pub async fn place_order(&mut self) -> Result<PlacedOrder, SessionError> {
        if self.state.identity.is_none() {
            return Err(SessionError::NotSignedIn);
        }

        let shipping = self
            .state
            .cart
            .shipping
            .clone()
            .ok_or(SessionError::MissingCheckoutDetails("shipping address"))?;

        let payment_method = self
            .state
            .cart
            .payment_method
            .clone()
            .ok_or(SessionError::MissingCheckoutDetails("payment method"))?;

        let breakdown = PriceBreakdown::compute(
            &self.state.cart.lines,
            shipping.delivery_type,
            self.state.cart.coupon.as_ref(),
        );

        let placed = self
            .api
            .create_order(OrderSubmission {
                lines: &self.state.cart.lines,
                shipping: &shipping,
                payment_method: &payment_method,
                breakdown: &breakdown,
                coupon_code: self.state.cart.coupon.as_ref().map(|c| c.code.as_str()),
            })
            .await?;

        self.state.cart.clear_lines();
        self.state.cart.remove_coupon();
        self.persist();

        info!(order = %placed.uuid, "order placed");

        Ok(placed)
    }
}

/// Last-resort line details when neither the API nor the demo catalog
/// knows the item.
fn placeholder_item(menu_item: Uuid) -> MenuItem {
    MenuItem {
        uuid: menu_item,
        name: "Menu item".to_string(),
        description: String::new(),
        price: rust_decimal::Decimal::ZERO,
        image_url: "/images/placeholder.jpg".to_string(),
        category: "uncategorized".to_string(),
        availability: true,
    }
}
