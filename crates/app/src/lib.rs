//! Ordering domain services and their Postgres persistence layer.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

mod uuids;
