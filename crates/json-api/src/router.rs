//! App Router

use salvo::Router;

use crate::{auth, authors, events, ingredients, recipes, role_permissions, users};

/// Every route behind bearer authentication.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("recipes")
                .get(recipes::index::handler)
                .post(recipes::create::handler)
                .push(
                    Router::with_path("{recipe}")
                        .get(recipes::get::handler)
                        .put(recipes::update::handler)
                        .delete(recipes::delete::handler),
                ),
        )
        .push(
            Router::with_path("authors")
                .get(authors::index::handler)
                .post(authors::create::handler)
                .push(
                    Router::with_path("{author}")
                        .get(authors::get::handler)
                        .put(authors::update::handler)
                        .delete(authors::delete::handler),
                ),
        )
        .push(
            Router::with_path("ingredients")
                .get(ingredients::index::handler)
                .post(ingredients::create::handler)
                .push(
                    Router::with_path("{ingredient}")
                        .get(ingredients::get::handler)
                        .put(ingredients::update::handler)
                        .delete(ingredients::delete::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
        .push(
            Router::with_path("role-permissions")
                .get(role_permissions::index::handler)
                .post(role_permissions::create::handler)
                .push(
                    Router::with_path("{role_permission}")
                        .get(role_permissions::get::handler)
                        .put(role_permissions::update::handler)
                        .delete(role_permissions::delete::handler),
                ),
        )
        .push(Router::with_path("events/recipe-added").post(events::recipe_added::handler))
}
