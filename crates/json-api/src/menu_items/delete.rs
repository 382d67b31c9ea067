//! Delete Menu Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, menu_items::errors::into_status_error, state::State};

/// Delete Menu Item Handler
#[endpoint(
    tags("menu-items"),
    summary = "Delete Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .menu_items
        .delete_menu_item(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::OK);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use mensa_app::domain::menu_items::{
        MenuItemsServiceError, MockMenuItemsService, models::MenuItemUuid,
    };

    use crate::test_helpers::{MockServices, admin_service};

    use super::*;

    fn make_service(menu_items: MockMenuItemsService) -> Service {
        let state = MockServices {
            menu_items,
            ..MockServices::default()
        }
        .into_state();

        admin_service(state, Router::with_path("menu-items/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_menu_item_success() -> TestResult {
        let uuid = MenuItemUuid::now_v7();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_delete_menu_item()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/menu-items/{uuid}"))
            .send(&make_service(menu_items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_item_returns_404() -> TestResult {
        let uuid = MenuItemUuid::now_v7();

        let mut menu_items = MockMenuItemsService::new();

        menu_items
            .expect_delete_menu_item()
            .once()
            .return_once(|_| Err(MenuItemsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/menu-items/{uuid}"))
            .send(&make_service(menu_items))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
