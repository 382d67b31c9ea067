//! Reports service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReportsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
