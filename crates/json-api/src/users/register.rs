//! Register Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use mensa_app::auth::models::{AuthenticatedSession, NewUser};

use crate::{
    extensions::*, state::State, users::errors::into_status_error, users::profile::UserResponse,
};

/// Register Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token; only shown once
    pub token: String,

    /// The signed-in user
    pub user: UserResponse,
}

impl From<AuthenticatedSession> for SessionResponse {
    fn from(session: AuthenticatedSession) -> Self {
        SessionResponse {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// Register Handler
#[endpoint(
    tags("users"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
