//! Review Models

use jiff::Timestamp;

use crate::{
    auth::models::UserUuid, domain::menu_items::models::MenuItemUuid, uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Review Model
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub user: UserUuid,
    pub user_name: String,
    pub menu_item: MenuItemUuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Review Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub menu_item: MenuItemUuid,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Review Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub rating: u8,
    pub comment: Option<String>,
}
