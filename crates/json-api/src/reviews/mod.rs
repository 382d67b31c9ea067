//! Review Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod errors;
pub(crate) mod for_menu_item;
pub(crate) mod mine;
pub(crate) mod update;
