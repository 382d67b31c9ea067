//! Test helpers.

use std::sync::Arc;

use mensa_app::{
    auth::{
        MockAuthService,
        models::{CurrentUser, Role, UserUuid},
    },
    context::AppContext,
    domain::{
        carts::MockCartsService, coupons::MockCouponsService, menu_items::MockMenuItemsService,
        orders::MockOrdersService, reports::MockReportsService, reviews::MockReviewsService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: CurrentUser = CurrentUser {
    uuid: UserUuid::from_uuid(Uuid::nil()),
    role: Role::Customer,
};

pub(crate) const TEST_ADMIN: CurrentUser = CurrentUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    role: Role::Admin,
};

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service; untouched mocks panic on any unexpected call.
pub(crate) struct MockServices {
    pub auth: MockAuthService,
    pub menu_items: MockMenuItemsService,
    pub carts: MockCartsService,
    pub coupons: MockCouponsService,
    pub orders: MockOrdersService,
    pub reviews: MockReviewsService,
    pub reports: MockReportsService,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            auth: MockAuthService::new(),
            menu_items: MockMenuItemsService::new(),
            carts: MockCartsService::new(),
            coupons: MockCouponsService::new(),
            orders: MockOrdersService::new(),
            reviews: MockReviewsService::new(),
            reports: MockReportsService::new(),
        }
    }
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        Arc::new(State::new(AppContext {
            auth: Arc::new(self.auth),
            menu_items: Arc::new(self.menu_items),
            carts: Arc::new(self.carts),
            coupons: Arc::new(self.coupons),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
            reports: Arc::new(self.reports),
        }))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

/// A service with the given state and no authenticated user.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// A service with [`TEST_USER`] already authenticated.
pub(crate) fn user_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service with [`TEST_ADMIN`] already authenticated.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}
