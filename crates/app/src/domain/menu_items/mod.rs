//! Menu Items

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::MenuItemsServiceError;
pub use service::*;
