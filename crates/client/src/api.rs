//! Typed JSON API client
//!
//! Thin `reqwest` wrapper around the Mensa JSON API. Every call returns
//! `Result<T, ApiError>`; there is no silent fallback to demo data at
//! this layer.

use std::str::FromStr;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use mensa::{
    cart::{AppliedCoupon, CartLine, ShippingAddress},
    menu::MenuItem,
    orders::DeliveryType,
    pricing::PriceBreakdown,
};

/// A failed API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,

        /// Message body, best effort.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// The signed-in user's profile as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// User identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// `customer` or `admin`.
    pub role: String,
}

/// A successful register or login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedSession {
    /// Bearer token for subsequent calls.
    pub token: String,

    /// The authenticated user.
    pub user: Profile,
}

/// The server's verdict on a coupon code.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponVerdict {
    /// Whether the coupon can be applied right now.
    pub valid: bool,

    /// Discount percentage, present when valid.
    #[serde(default)]
    pub discount_percent: Option<String>,

    /// Rejection reason, present when invalid.
    #[serde(default)]
    pub reason: Option<String>,
}

impl CouponVerdict {
    /// Convert a valid verdict into an [`AppliedCoupon`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the verdict is valid but the
    /// discount is missing or not a decimal.
    pub fn into_applied(self, code: &str) -> Result<Option<AppliedCoupon>, ApiError> {
        if !self.valid {
            return Ok(None);
        }

        let percent = self
            .discount_percent
            .ok_or_else(|| ApiError::Decode("valid verdict without a discount".to_string()))?;

        let discount_percent = Decimal::from_str(&percent)
            .map_err(|error| ApiError::Decode(format!("bad discount_percent: {error}")))?;

        Ok(Some(AppliedCoupon {
            code: code.to_string(),
            discount_percent,
        }))
    }
}

/// A placed order as returned by order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedOrder {
    /// Order identifier.
    pub uuid: Uuid,

    /// Lifecycle state, `pending` on creation.
    pub status: String,

    /// Estimated hand-over time, RFC 3339.
    pub eta: String,

    /// Grand total as the server stored it.
    pub total_price: String,
}

#[derive(Debug, Deserialize)]
struct MenuItemDto {
    uuid: Uuid,
    name: String,
    description: String,
    price: String,
    image_url: String,
    category: String,
    availability: bool,
}

impl MenuItemDto {
    fn into_menu_item(self) -> Result<MenuItem, ApiError> {
        let price = Decimal::from_str(&self.price)
            .map_err(|error| ApiError::Decode(format!("bad price: {error}")))?;

        Ok(MenuItem {
            uuid: self.uuid,
            name: self.name,
            description: self.description,
            price,
            image_url: self.image_url,
            category: self.category,
            availability: self.availability,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MenuItemsDto {
    menu_items: Vec<MenuItemDto>,
}

#[derive(Debug, Serialize)]
struct CartLineDto<'a> {
    menu_item: Uuid,
    quantity: u32,
    instructions: Option<&'a str>,
}

impl<'a> From<&'a CartLine> for CartLineDto<'a> {
    fn from(line: &'a CartLine) -> Self {
        CartLineDto {
            menu_item: line.menu_item,
            quantity: line.quantity,
            instructions: line.instructions.as_deref(),
        }
    }
}

/// Everything needed to place an order.
#[derive(Debug, Clone)]
pub struct OrderSubmission<'a> {
    /// Cart lines to materialize as order items.
    pub lines: &'a [CartLine],

    /// Delivery destination and contact details.
    pub shipping: &'a ShippingAddress,

    /// Chosen payment method label.
    pub payment_method: &'a str,

    /// Client-computed price breakdown, stored as submitted.
    pub breakdown: &'a PriceBreakdown,

    /// Applied coupon code, if any.
    pub coupon_code: Option<&'a str>,
}

/// Typed client for the Mensa JSON API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// A client for the API at `base_url`, unauthenticated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token to subsequent calls.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a bearer token is attached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// The menu, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Fails when the API is unreachable or answers with an error
    /// status; callers may fall back to [`mensa::fixtures::demo_menu`].
    pub async fn list_menu_items(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<MenuItem>, ApiError> {
        let mut request = self.request(Method::GET, "/menu-items");

        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let body: MenuItemsDto = Self::check(request.send().await?).await?.json().await?;

        body.menu_items
            .into_iter()
            .map(MenuItemDto::into_menu_item)
            .collect()
    }

    /// A single menu item.
    ///
    /// # Errors
    ///
    /// Fails when the item is unknown or the API is unreachable.
    pub async fn get_menu_item(&self, uuid: Uuid) -> Result<MenuItem, ApiError> {
        let response = self
            .request(Method::GET, &format!("/menu-items/{uuid}"))
            .send()
            .await?;

        let body: MenuItemDto = Self::check(response).await?.json().await?;

        body.into_menu_item()
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Fails with a 409 [`ApiError::Status`] when the email is taken.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, ApiError> {
        let response = self
            .request(Method::POST, "/users")
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Fails with a 401 [`ApiError::Status`] on bad credentials.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, ApiError> {
        let response = self
            .request(Method::POST, "/users/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Replace the server cart wholesale with the given lines.
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the API is unreachable.
    pub async fn sync_cart(&self, lines: &[CartLine]) -> Result<(), ApiError> {
        let items: Vec<CartLineDto<'_>> = lines.iter().map(Into::into).collect();

        let response = self
            .request(Method::POST, "/cart/sync")
            .json(&json!({ "items": items }))
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    /// Ask the server whether a coupon code is redeemable.
    ///
    /// A rejected coupon is a normal verdict, not an [`ApiError`].
    ///
    /// # Errors
    ///
    /// Fails when unauthenticated or the API is unreachable.
    pub async fn validate_coupon(&self, code: &str) -> Result<CouponVerdict, ApiError> {
        let response = self
            .request(Method::POST, "/coupons/validate")
            .json(&json!({ "code": code }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Fails with a 400 [`ApiError::Status`] when the order would be
    /// empty, and with [`ApiError::Http`] when the API is unreachable.
    pub async fn create_order(
        &self,
        submission: OrderSubmission<'_>,
    ) -> Result<PlacedOrder, ApiError> {
        let lines: Vec<serde_json::Value> = submission
            .lines
            .iter()
            .map(|line| {
                json!({
                    "menu_item": line.menu_item,
                    "name": line.name,
                    "price": line.price.to_string(),
                    "quantity": line.quantity,
                    "instructions": line.instructions,
                })
            })
            .collect();

        let shipping = submission.shipping;

        let body = json!({
            "delivery_type": submission.shipping.delivery_type,
            "payment_method": submission.payment_method,
            "address": optional(&shipping.address, shipping.delivery_type),
            "city": optional(&shipping.city, shipping.delivery_type),
            "postal_code": optional(&shipping.postal_code, shipping.delivery_type),
            "phone": shipping.phone,
            "items_price": submission.breakdown.items.to_string(),
            "tax_price": submission.breakdown.tax.to_string(),
            "delivery_price": submission.breakdown.delivery.to_string(),
            "discount": submission.breakdown.discount.to_string(),
            "total_price": submission.breakdown.total.to_string(),
            "coupon_code": submission.coupon_code,
            "lines": lines,
        });

        let response = self
            .request(Method::POST, "/orders")
            .json(&body)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Whether a status error represents "unauthorized".
    #[must_use]
    pub fn is_unauthorized(error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED.as_u16()
        )
    }
}

/// Address fields are meaningful for delivery only; pickup orders send
/// nothing.
fn optional(value: &str, delivery_type: DeliveryType) -> Option<&str> {
    match delivery_type {
        DeliveryType::Delivery => Some(value),
        DeliveryType::Pickup => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_verdict_becomes_an_applied_coupon() {
        let verdict = CouponVerdict {
            valid: true,
            discount_percent: Some("10".to_string()),
            reason: None,
        };

        let applied = verdict
            .into_applied("WELCOME10")
            .ok()
            .flatten()
            .map(|c| (c.code, c.discount_percent));

        assert_eq!(
            applied,
            Some(("WELCOME10".to_string(), Decimal::new(10, 0)))
        );
    }

    #[test]
    fn rejected_verdict_yields_no_coupon() {
        let verdict = CouponVerdict {
            valid: false,
            discount_percent: None,
            reason: Some("This coupon has expired".to_string()),
        };

        assert!(matches!(verdict.into_applied("WELCOME10"), Ok(None)));
    }

    #[test]
    fn valid_verdict_without_discount_is_a_decode_error() {
        let verdict = CouponVerdict {
            valid: true,
            discount_percent: None,
            reason: None,
        };

        assert!(matches!(
            verdict.into_applied("WELCOME10"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn pickup_orders_send_no_address_fields() {
        assert_eq!(optional("1 Main St", DeliveryType::Pickup), None);
        assert_eq!(
            optional("1 Main St", DeliveryType::Delivery),
            Some("1 Main St")
        );
    }
}
