//! Reports

pub mod errors;
mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use service::*;
