//! Server-rendered pages: landing, login, dashboard and admin console.
//!
//! `/dashboard` and `/admin` sit behind [`crate::api::middleware::page_gate`],
//! so their handlers can rely on a session being present. The admin forms
//! under `/admin/members` also require the member write permission.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::extractors::{MemberAdmin, MemberId};
use crate::api::middleware::{session_cookie, session_cookie_removal, CurrentSession};
use crate::api::AppState;
use crate::domain::{Member, MemberPayload};
use crate::errors::{AppError, AppResult, ResultExt};
use crate::services::Claims;
use crate::utils::html;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminPageQuery {
    saved: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Create page routes
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout_submit))
        .route("/dashboard", get(dashboard))
        .route("/admin", get(admin_console))
        .route("/admin/members", post(admin_create_member))
        .route("/admin/members/:id", post(admin_update_member))
        .route("/admin/members/:id/edit", get(admin_edit_page))
        .route("/admin/members/:id/delete", post(admin_delete_member))
}

fn home_for(session: &CurrentSession) -> Option<&'static str> {
    session
        .role()
        .map(|role| if role.is_admin() { "/admin" } else { "/dashboard" })
}

pub async fn landing(session: CurrentSession) -> Html<String> {
    let action = match home_for(&session) {
        Some(home) => format!(r#"<a href="{}">Continue</a>"#, home),
        None => r#"<a href="/login">Sign in</a>"#.to_string(),
    };

    Html(html::layout(
        "Welcome",
        &format!(
            "<h1>Gym Membership</h1>\n<p>Membership records and status at a glance.</p>\n<p>{}</p>",
            action
        ),
    ))
}

pub async fn login_page(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    if let Some(home) = home_for(&session) {
        return Redirect::to(home).into_response();
    }

    let notice = match query.error.as_deref() {
        Some("CredentialsSignin") => "<p role=\"alert\">Invalid username or password.</p>",
        Some(_) => "<p role=\"alert\">Sign-in failed. Please try again.</p>",
        None => "",
    };

    let google = if state.identity_provider.is_some() {
        r#"<p><a href="/auth/google">Sign in with Google</a></p>"#
    } else {
        ""
    };

    let body = format!(
        r#"<h1>Sign in</h1>
{notice}
<form method="post" action="/login">
<label>Username <input name="username" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" required></label>
<button type="submit">Sign in</button>
</form>
{google}"#,
        notice = notice,
        google = google,
    );

    Html(html::layout("Sign in", &body)).into_response()
}

pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.auth_service.login(&form.username, &form.password).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(session.token, state.cookie_secure));
            Ok((jar, Redirect::to("/admin")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            Ok(Redirect::to("/login?error=CredentialsSignin").into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn logout_submit(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(session_cookie_removal()), Redirect::to("/login"))
}

pub async fn dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Html<String>> {
    let claims = session.claims().ok_or(AppError::Unauthorized)?;
    let members = state.member_service.list_members().await?;
    let active = members.iter().filter(|m| m.is_active()).count();

    let body = format!(
        "{bar}\n<h1>Dashboard</h1>\n<p>{active} of {total} memberships active.</p>\n{table}",
        bar = html::session_bar(&claims.name, claims.role.as_str()),
        active = active,
        total = members.len(),
        table = html::member_table(&members, false),
    );

    Ok(Html(html::layout("Dashboard", &body)))
}

pub async fn admin_console(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<AdminPageQuery>,
) -> AppResult<Html<String>> {
    let claims = session.claims().ok_or(AppError::Unauthorized)?;
    let members = state.member_service.list_members().await?;

    let notice = match query.saved.as_deref() {
        Some("created") => Some("Member added successfully."),
        Some("updated") => Some("Member updated."),
        Some("deleted") => Some("Member deleted."),
        _ => None,
    };

    Ok(Html(render_admin(
        claims,
        &members,
        &MemberPayload::default(),
        None,
        notice,
    )))
}

fn render_admin(
    claims: &Claims,
    members: &[Member],
    values: &MemberPayload,
    error: Option<&str>,
    notice: Option<&str>,
) -> String {
    let mut defaults = values.clone();
    if defaults.status.is_empty() {
        defaults.status = "ACTIVE".to_string();
    }

    let body = format!(
        "{bar}\n<h1>Manage members</h1>\n{notice}{form}\n{table}",
        bar = html::session_bar(&claims.name, claims.role.as_str()),
        notice = notice
            .map(|n| format!("<p role=\"status\">{}</p>\n", html::escape(n)))
            .unwrap_or_default(),
        form = html::member_form(
            "Add New Member",
            "/admin/members",
            &defaults,
            "Save member",
            error,
        ),
        table = html::member_table(members, true),
    );

    html::layout("Admin", &body)
}

fn render_edit(claims: &Claims, id: i32, values: &MemberPayload, error: Option<&str>) -> String {
    let body = format!(
        "{bar}\n<h1>Edit member</h1>\n{form}\n<p><a href=\"/admin\">Back to members</a></p>",
        bar = html::session_bar(&claims.name, claims.role.as_str()),
        form = html::member_form(
            "Member details",
            &format!("/admin/members/{}", id),
            values,
            "Save changes",
            error,
        ),
    );

    html::layout("Edit member", &body)
}

pub async fn admin_create_member(
    State(state): State<AppState>,
    admin: MemberAdmin,
    Form(payload): Form<MemberPayload>,
) -> AppResult<Response> {
    let values = payload.clone();

    match payload.parse() {
        Ok(draft) => {
            state
                .member_service
                .create_member(draft)
                .await
                .or_failed("Unable to save member.")?;
            Ok(Redirect::to("/admin?saved=created").into_response())
        }
        Err(AppError::Validation(message)) => {
            let members = state.member_service.list_members().await?;
            let page = render_admin(&admin.0, &members, &values, Some(&message), None);
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn admin_edit_page(
    State(state): State<AppState>,
    admin: MemberAdmin,
    id: MemberId,
) -> AppResult<Html<String>> {
    let member = state.member_service.get_member(id.0).await?;
    Ok(Html(render_edit(&admin.0, id.0, &MemberPayload::from(&member), None)))
}

pub async fn admin_update_member(
    State(state): State<AppState>,
    admin: MemberAdmin,
    id: MemberId,
    Form(payload): Form<MemberPayload>,
) -> AppResult<Response> {
    let values = payload.clone();

    match payload.parse() {
        Ok(draft) => {
            state
                .member_service
                .update_member(id.0, draft)
                .await
                .or_failed("Unable to update member.")?;
            Ok(Redirect::to("/admin?saved=updated").into_response())
        }
        Err(AppError::Validation(message)) => {
            let page = render_edit(&admin.0, id.0, &values, Some(&message));
            Ok((StatusCode::BAD_REQUEST, Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn admin_delete_member(
    State(state): State<AppState>,
    _admin: MemberAdmin,
    id: MemberId,
) -> AppResult<Redirect> {
    state
        .member_service
        .delete_member(id.0)
        .await
        .or_failed("Unable to delete member.")?;

    Ok(Redirect::to("/admin?saved=deleted"))
}
