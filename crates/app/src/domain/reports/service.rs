//! Reports service.

use async_trait::async_trait;
use jiff::Timestamp;
use mensa::reports::{SalesSummary, sales_summary};
use mockall::automock;

use crate::{
    database::Db,
    domain::reports::{errors::ReportsServiceError, repository::PgReportsRepository},
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn sales_report(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<SalesSummary, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .repository
            .completed_orders_between(&mut tx, start, end)
            .await?;

        let lines = self
            .repository
            .completed_order_lines_between(&mut tx, start, end)
            .await?;

        tx.commit().await?;

        Ok(sales_summary(&orders, &lines))
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Aggregate completed orders placed inside the range, bounds inclusive.
    async fn sales_report(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<SalesSummary, ReportsServiceError>;
}
