//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

impl Role {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole),
        }
    }
}

/// Parse error for the role storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role")]
pub struct UnknownRole;

/// User Model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration payload. The password arrives in the clear and is hashed
/// before it reaches storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub uuid: UserUuid,
    pub role: Role,
}

/// A successful login or registration: the user plus a one-time raw
/// bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

/// Stored credentials looked up during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Session token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSessionToken {
    pub user: CurrentUser,
    pub token_hash: String,
}
