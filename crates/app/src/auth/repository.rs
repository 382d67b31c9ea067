//! Auth repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::auth::{
    models::{
        ActiveSessionToken, CurrentUser, NewUser, ProfileUpdate, Role, User, UserCredentials,
        UserUuid,
    },
    token::SessionTokenVersion,
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const CREATE_SESSION_TOKEN_SQL: &str = include_str!("sql/create_session_token.sql");
const FIND_ACTIVE_SESSION_TOKEN_SQL: &str = include_str!("sql/find_active_session_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
        user: &NewUser,
        password_hash: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(&user.name)
            .bind(&user.email)
            .bind(password_hash)
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(GET_USER_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Partial update; `password_hash` replaces the stored hash only when
    /// present.
    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: UserUuid,
        update: &ProfileUpdate,
        password_hash: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        query_as::<Postgres, User>(UPDATE_USER_SQL)
            .bind(uuid.into_uuid())
            .bind(update.name.as_deref())
            .bind(update.email.as_deref())
            .bind(password_hash)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<Postgres, User>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_session_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        user: UserUuid,
        version: SessionTokenVersion,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_TOKEN_SQL)
            .bind(token_uuid)
            .bind(user.into_uuid())
            .bind(version.as_i16())
            .bind(token_hash)
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_session_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        version: SessionTokenVersion,
    ) -> Result<Option<ActiveSessionToken>, sqlx::Error> {
        query_as::<Postgres, ActiveSessionToken>(FIND_ACTIVE_SESSION_TOKEN_SQL)
            .bind(token_uuid)
            .bind(version.as_i16())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: try_get_role(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: User::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveSessionToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: CurrentUser {
                uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
                role: try_get_role(row)?,
            },
            token_hash: row.try_get("token_hash")?,
        })
    }
}

fn try_get_role(row: &PgRow) -> Result<Role, sqlx::Error> {
    let raw: String = row.try_get("role")?;

    raw.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "role".to_string(),
        source: Box::new(e),
    })
}
