//! Sales Report Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mensa::reports::{DailySales, ItemSales, SalesSummary};

use crate::{extensions::*, state::State};

/// One day in the report range.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DailySalesResponse {
    /// UTC date, `YYYY-MM-DD`
    pub date: String,

    /// Completed orders that day
    pub orders: u64,

    /// Revenue as a decimal string
    pub revenue: String,

    /// Profit as a decimal string
    pub profit: String,
}

impl From<DailySales> for DailySalesResponse {
    fn from(day: DailySales) -> Self {
        DailySalesResponse {
            date: day.date.to_string(),
            orders: day.orders,
            revenue: day.revenue.to_string(),
            profit: day.profit.to_string(),
        }
    }
}

/// One menu item in the top-sellers list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemSalesResponse {
    pub menu_item: Uuid,
    pub name: String,
    pub quantity_sold: u64,

    /// Line revenue as a decimal string
    pub revenue: String,
}

impl From<ItemSales> for ItemSalesResponse {
    fn from(item: ItemSales) -> Self {
        ItemSalesResponse {
            menu_item: item.menu_item,
            name: item.name,
            quantity_sold: item.quantity_sold,
            revenue: item.revenue.to_string(),
        }
    }
}

/// Sales Report Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SalesReportResponse {
    pub total_orders: u64,
    pub total_revenue: String,
    pub total_cost: String,
    pub total_profit: String,

    /// Per-day breakdown, ascending by date
    pub daily: Vec<DailySalesResponse>,

    /// Top five items by units sold
    pub top_items: Vec<ItemSalesResponse>,
}

impl From<SalesSummary> for SalesReportResponse {
    fn from(summary: SalesSummary) -> Self {
        SalesReportResponse {
            total_orders: summary.total_orders,
            total_revenue: summary.total_revenue.to_string(),
            total_cost: summary.total_cost.to_string(),
            total_profit: summary.total_profit.to_string(),
            daily: summary.daily.into_iter().map(Into::into).collect(),
            top_items: summary.top_items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sales Report Handler
///
/// Aggregates completed orders between `start` and `end` (RFC 3339,
/// inclusive).
#[endpoint(
    tags("reports"),
    summary = "Sales Report",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The sales report"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad range"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    start: QueryParam<String, true>,
    end: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<SalesReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let start = start.into_inner().as_str().into_timestamp("start")?;
    let end = end.into_inner().as_str().into_timestamp("end")?;

    if start > end {
        return Err(StatusError::bad_request().brief("start must not be after end"));
    }

    let summary = state
        .app
        .reports
        .sales_report(start, end)
        .await
        .or_500("failed to build sales report")?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use mensa_app::domain::reports::MockReportsService;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{MockServices, admin_service};

    use super::*;

    fn make_service(reports: MockReportsService) -> Service {
        let state = MockServices {
            reports,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("reports/sales").get(handler))
    }

    fn make_summary() -> SalesSummary {
        SalesSummary {
            total_orders: 3,
            total_revenue: Decimal::new(1530, 0),
            total_cost: Decimal::new(600, 0),
            total_profit: Decimal::new(930, 0),
            daily: vec![DailySales {
                date: date(1970, 1, 1),
                orders: 3,
                revenue: Decimal::new(1530, 0),
                profit: Decimal::new(930, 0),
            }],
            top_items: vec![ItemSales {
                menu_item: Uuid::nil(),
                name: "Classic Burger".to_string(),
                quantity_sold: 6,
                revenue: Decimal::new(1200, 0),
            }],
        }
    }

    #[tokio::test]
    async fn test_sales_report_success() -> TestResult {
        let mut reports = MockReportsService::new();

        reports
            .expect_sales_report()
            .once()
            .withf(|start, end| start < end)
            .return_once(|_, _| Ok(make_summary()));

        let url = "http://example.com/reports/sales\
                   ?start=1970-01-01T00:00:00Z&end=1970-01-02T00:00:00Z";

        let response: SalesReportResponse = TestClient::get(url)
            .send(&make_service(reports))
            .await
            .take_json()
            .await?;

        assert_eq!(response.total_orders, 3);
        assert_eq!(response.total_revenue, "1530");
        assert_eq!(response.daily.first().map(|d| d.date.as_str()), Some("1970-01-01"));
        assert_eq!(response.top_items.first().map(|i| i.quantity_sold), Some(6));

        Ok(())
    }

    #[tokio::test]
    async fn test_inverted_range_returns_400() -> TestResult {
        let url = "http://example.com/reports/sales\
                   ?start=1970-01-02T00:00:00Z&end=1970-01-01T00:00:00Z";

        let res = TestClient::get(url)
            .send(&make_service(MockReportsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_timestamp_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/reports/sales?start=lastweek&end=now")
            .send(&make_service(MockReportsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
