//! Auth middleware.

use std::sync::Arc;

use recipes_app::auth::{AuthServiceError, Caller};
use salvo::{
    http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE},
    prelude::*,
};
use tracing::error;

use crate::{extensions::*, state::State};

const BEARER_CHALLENGE: &str = "Bearer realm=\"recipes\"";

/// Resolve the caller behind the request's bearer token.
async fn authenticate(req: &Request, depot: &Depot) -> Result<Caller, StatusError> {
    let token = bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|auth_error| match auth_error {
            AuthServiceError::NotFound => StatusError::unauthorized().brief("Invalid API token"),
            other => {
                error!("failed to authenticate api token: {other}");

                StatusError::internal_server_error()
            }
        })
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(caller) => {
            depot.insert_caller(caller);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status_error) => {
            if status_error.code == StatusCode::UNAUTHORIZED {
                res.headers_mut().insert(
                    WWW_AUTHENTICATE,
                    HeaderValue::from_static(BEARER_CHALLENGE),
                );
            }

            res.render(status_error);
            ctrl.skip_rest();
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
