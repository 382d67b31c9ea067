//! User Handlers

pub(crate) mod errors;
pub(crate) mod index;
pub(crate) mod login;
pub(crate) mod profile;
pub(crate) mod register;
pub(crate) mod update_profile;
