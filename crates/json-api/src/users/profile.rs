//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa_app::auth::models::User;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role ("customer" or "admin")
    pub role: String,

    /// The date and time the user was created
    pub created_at: String,

    /// The date and time the user was last updated
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Get Profile Handler
///
/// Returns the signed-in user's profile.
#[endpoint(
    tags("users"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let profile = state
        .app
        .auth
        .get_user(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}
