//! Mensa storefront client
//!
//! The client layer used by customer-facing frontends: a typed API
//! client over the JSON API, explicit session/cart state with pure
//! reducers from [`mensa`], and pluggable local persistence. Nothing in
//! here substitutes demo data on failure; API errors surface as
//! [`api::ApiError`] and callers decide whether to fall back to
//! [`mensa::fixtures::demo_menu`].

pub mod api;
pub mod session;
pub mod state;
pub mod storage;
