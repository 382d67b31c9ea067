//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{
            AuthenticatedSession, CurrentUser, NewUser, ProfileUpdate, Role, User, UserUuid,
        },
        password::{hash_password, verify_password},
        repository::PgAuthRepository,
        token::{
            SessionTokenVersion, build_verifier_input, digest_verifier_input,
            format_session_token, generate_session_token_secret, parse_session_token,
        },
    },
    database::Db,
};

/// How long an issued bearer token stays valid.
const SESSION_TTL: SignedDuration = SignedDuration::from_hours(30 * 24);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Create an admin account. Only reachable from the operator CLI.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::AlreadyExists`] when the email is taken,
    /// or a hashing/storage error.
    pub async fn create_admin(&self, user: NewUser) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let password_hash = hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(&mut tx, UserUuid::now_v7(), &user, &password_hash, Role::Admin)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn issue_session_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<String, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(token_uuid, version, &secret);

        let verifier_input = build_verifier_input(&token_uuid, version, &user, &secret);
        let token_hash = digest_verifier_input(&verifier_input);
        let expires_at = Timestamp::now().saturating_add(SESSION_TTL).unwrap_or(Timestamp::MAX);

        self.repository
            .create_session_token(tx, token_uuid, user, version, &token_hash, expires_at)
            .await?;

        Ok(token)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, user: NewUser) -> Result<AuthenticatedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let password_hash = hash_password(&user.password)?;

        let created = self
            .repository
            .create_user(&mut tx, UserUuid::now_v7(), &user, &password_hash, Role::Customer)
            .await?;

        let token = self.issue_session_token(&mut tx, created.uuid).await?;

        tx.commit().await?;

        tracing::info!(user = %created.uuid, "user registered");

        Ok(AuthenticatedSession {
            user: created,
            token,
        })
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_email(&mut tx, email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &credentials.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self
            .issue_session_token(&mut tx, credentials.user.uuid)
            .await?;

        tx.commit().await?;

        Ok(AuthenticatedSession {
            user: credentials.user,
            token,
        })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CurrentUser, AuthServiceError> {
        let parsed =
            parse_session_token(bearer_token).map_err(|_| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let active = self
            .repository
            .find_active_session_token(&mut tx, parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        let verifier_input = build_verifier_input(
            &parsed.token_uuid,
            parsed.version,
            &active.user.uuid,
            &parsed.secret,
        );

        if digest_verifier_input(&verifier_input) != active.token_hash {
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(active.user)
    }

    async fn get_user(&self, uuid: UserUuid) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        uuid: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let password_hash = match update.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let updated = self
            .repository
            .update_user(&mut tx, uuid, &update, password_hash.as_deref())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer account and sign it in.
    async fn register(&self, user: NewUser) -> Result<AuthenticatedSession, AuthServiceError>;

    /// Exchange credentials for a bearer token.
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CurrentUser, AuthServiceError>;

    /// Fetch a user's profile.
    async fn get_user(&self, uuid: UserUuid) -> Result<User, AuthServiceError>;

    /// Apply a partial profile update.
    async fn update_profile(
        &self,
        uuid: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, AuthServiceError>;

    /// List every registered user.
    async fn list_users(&self) -> Result<Vec<User>, AuthServiceError>;
}
