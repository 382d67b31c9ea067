//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        coupons::{CouponsService, PgCouponsService},
        menu_items::{MenuItemsService, PgMenuItemsService},
        orders::{OrdersService, PgOrdersService},
        reports::{PgReportsService, ReportsService},
        reviews::{PgReviewsService, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub menu_items: Arc<dyn MenuItemsService>,
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub reports: Arc<dyn ReportsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, pool_size: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, pool_size)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            auth: Arc::new(PgAuthService::new(db.clone())),
            menu_items: Arc::new(PgMenuItemsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            reports: Arc::new(PgReportsService::new(db)),
        })
    }
}
