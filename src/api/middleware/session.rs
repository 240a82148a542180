//! Session decoding middleware and cookie helpers.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::config::SESSION_COOKIE;
use crate::domain::Role;
use crate::services::Claims;

/// Verified session of the current request, `None` when anonymous
#[derive(Clone, Debug, Default)]
pub struct CurrentSession(pub Option<Claims>);

impl CurrentSession {
    pub fn claims(&self) -> Option<&Claims> {
        self.0.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.0.as_ref().map(|claims| claims.role)
    }
}

/// Decode the session token of every request.
///
/// A bearer header wins over the cookie. Invalid or expired tokens leave
/// the request anonymous instead of failing it.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = session_token(request.headers()).and_then(|token| {
        match state.auth_service.verify_token(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Ignoring invalid session token: {:?}", e);
                None
            }
        }
    });

    request.extensions_mut().insert(CurrentSession(claims));

    next.run(request).await
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Browser-session cookie carrying a signed token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Cookie matching [`session_cookie`] for removal from a jar.
pub fn session_cookie_removal() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
