//! Page-level authorization gate.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::CurrentSession;
use crate::domain::{authorize, Action, Denial, Resource};

/// Redirect page requests the current session may not see.
///
/// Anonymous visitors go to `/login`, signed-in users without the needed
/// role go to `/dashboard`. Paths outside `/admin` and `/dashboard` pass.
pub async fn page_gate(request: Request, next: Next) -> Response {
    if let Some(resource) = Resource::for_path(request.uri().path()) {
        let role = request
            .extensions()
            .get::<CurrentSession>()
            .and_then(CurrentSession::role);

        if let Err(denial) = authorize(role, resource, Action::Read) {
            let target = match denial {
                Denial::Unauthenticated => "/login",
                Denial::Forbidden => "/dashboard",
            };
            tracing::debug!(path = %request.uri().path(), ?denial, "Page gate redirect");
            return Redirect::to(target).into_response();
        }
    }

    next.run(request).await
}
