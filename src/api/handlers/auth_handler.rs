//! Authentication handlers.
//!
//! JSON endpoints for the static admin login and session inspection, plus
//! the browser redirects of the Google sign-in flow.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{session_cookie, session_cookie_removal, CurrentSession};
use crate::api::AppState;
use crate::config::{OAUTH_STATE_COOKIE, OAUTH_STATE_TTL_MINUTES};
use crate::domain::{FieldOrder, Role};
use crate::errors::{AppError, AppResult};
use crate::infra::IdentityProvider;
use crate::services::{IssuedSession, TokenResponse};
use crate::types::{ErrorResponse, OkResponse};

const OAUTH_FAILURE_REDIRECT: &str = "/login?error=OAuthCallback";

/// Admin login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "admin")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "admin")]
    pub password: String,
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["username", "password"];
}

/// Signed-in identity as exposed to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    #[schema(example = "Gym Admin")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "admin@gym.local")]
    pub email: Option<String>,
    pub role: Role,
}

/// Current session; empty object when anonymous
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// Expiry as RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

/// Available sign-in methods
#[derive(Debug, Serialize, ToSchema)]
pub struct ProvidersResponse {
    #[schema(example = json!(["credentials", "google"]))]
    pub providers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/providers", get(providers))
        .route("/google", get(google_start))
        .route("/google/callback", get(google_callback))
}

/// Sign in with the static admin credentials
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = TokenResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    let jar = jar.add(session_cookie(session.token.clone(), state.cookie_secure));
    Ok((jar, Json(TokenResponse::from(&session))))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    responses((status = 200, description = "Signed out", body = OkResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    (jar.remove(session_cookie_removal()), Json(OkResponse::new()))
}

/// Inspect the current session
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Authentication",
    responses((status = 200, description = "Current session, `{}` when anonymous", body = SessionResponse))
)]
pub async fn session(current: CurrentSession) -> Json<SessionResponse> {
    let response = match current.0 {
        Some(claims) => SessionResponse {
            expires: DateTime::from_timestamp(claims.exp, 0),
            user: Some(SessionUser {
                name: claims.name,
                email: claims.email,
                role: claims.role,
            }),
        },
        None => SessionResponse::default(),
    };

    Json(response)
}

/// List sign-in methods
#[utoipa::path(
    get,
    path = "/auth/providers",
    tag = "Authentication",
    responses((status = 200, description = "Enabled providers", body = ProvidersResponse))
)]
pub async fn providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.providers().into_iter().map(String::from).collect(),
    })
}

/// Start the Google sign-in redirect
pub async fn google_start(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some(provider) = state.identity_provider.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let oauth_state = Uuid::new_v4().to_string();
    let url = match provider.authorize_url(&oauth_state) {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };

    let cookie = Cookie::build((OAUTH_STATE_COOKIE, oauth_state))
        .path("/auth/google")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .max_age(time::Duration::minutes(OAUTH_STATE_TTL_MINUTES))
        .build();

    (jar.add(cookie), Redirect::to(&url)).into_response()
}

/// Finish the Google sign-in: check state, exchange code, issue a user session
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<OAuthCallback>,
) -> Response {
    let Some(provider) = state.identity_provider.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let expected_state = jar.get(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(Cookie::build(OAUTH_STATE_COOKIE).path("/auth/google"));

    let result = finish_google_sign_in(&state, provider.as_ref(), params, expected_state).await;

    match result {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token, state.cookie_secure));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            tracing::warn!(error = ?e, "OAuth callback failed");
            (jar, Redirect::to(OAUTH_FAILURE_REDIRECT)).into_response()
        }
    }
}

async fn finish_google_sign_in(
    state: &AppState,
    provider: &dyn IdentityProvider,
    params: OAuthCallback,
    expected_state: Option<String>,
) -> AppResult<IssuedSession> {
    if let Some(error) = params.error {
        return Err(AppError::bad_request(format!("provider returned {}", error)));
    }
    if params.state.is_none() || params.state != expected_state {
        return Err(AppError::bad_request("OAuth state mismatch"));
    }
    let code = params
        .code
        .ok_or_else(|| AppError::bad_request("Missing authorization code"))?;

    let identity = provider.exchange(&code).await?;
    state.auth_service.sign_in_external(identity)
}
