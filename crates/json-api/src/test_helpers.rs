//! Test helpers.

use std::sync::Arc;

use recipes_app::{
    auth::{Caller, MockAuthService},
    context::AppContext,
    domain::{
        authors::MockAuthorsService, ingredients::MockIngredientsService,
        recipes::MockRecipesService, role_permissions::MockRolePermissionsService,
        users::MockUsersService,
    },
    events::{InMemoryMessageBus, MockRecipeEventsService},
    permissions::Role,
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SUBJECT: &str = "tester@example.com";

pub(crate) fn test_caller() -> Caller {
    Caller::new(TEST_SUBJECT, [Role::user()])
}

#[salvo::handler]
pub(crate) async fn inject_caller(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_caller(test_caller());
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test [`State`].
///
/// A mock without expectations fails the test on any call, so only the
/// service under test needs configuring.
#[derive(Default)]
pub(crate) struct Mocks {
    pub recipes: MockRecipesService,
    pub authors: MockAuthorsService,
    pub ingredients: MockIngredientsService,
    pub users: MockUsersService,
    pub role_permissions: MockRolePermissionsService,
    pub recipe_events: MockRecipeEventsService,
    pub auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            recipes: Arc::new(self.recipes),
            authors: Arc::new(self.authors),
            ingredients: Arc::new(self.ingredients),
            users: Arc::new(self.users),
            role_permissions: Arc::new(self.role_permissions),
            recipe_events: Arc::new(self.recipe_events),
            auth: Arc::new(self.auth),
            bus: Arc::new(InMemoryMessageBus::default()),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

/// Serve `route` as an authenticated [`test_caller`].
pub(crate) fn authenticated_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_caller)
            .push(route),
    )
}
