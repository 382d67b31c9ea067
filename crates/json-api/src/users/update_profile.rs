//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mensa_app::auth::models::ProfileUpdate;

use crate::{
    extensions::*, state::State, users::errors::into_status_error, users::profile::UserResponse,
};

/// Update Profile Request; omitted fields keep their stored value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("users"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let updated = state
        .app
        .auth
        .update_profile(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use mensa_app::auth::MockAuthService;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER, state_with_auth, user_service};

    use super::{super::tests::make_user, *};

    fn make_service(auth: MockAuthService) -> Service {
        user_service(
            state_with_auth(auth),
            Router::with_path("users/profile").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_profile_forwards_partial_update() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_update_profile()
            .once()
            .withf(|uuid, update| {
                *uuid == TEST_USER.uuid
                    && update.name.as_deref() == Some("Asha P")
                    && update.email.is_none()
                    && update.password.is_none()
            })
            .return_once(|uuid, _| {
                let mut user = make_user(uuid);

                user.name = "Asha P".to_string();

                Ok(user)
            });

        let response: UserResponse = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "name": "Asha P" }))
            .send(&make_service(auth))
            .await
            .take_json()
            .await?;

        assert_eq!(response.name, "Asha P");

        Ok(())
    }
}
