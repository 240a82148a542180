//! Member API handlers.
//!
//! Extractor order encodes the check order for mutations: role, then id,
//! then payload, before the service reports existence or write failures.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{MemberAdmin, MemberId, MemberReader, ValidatedJson};
use crate::api::AppState;
use crate::domain::MemberPayload;
use crate::errors::{AppResult, ResultExt};
use crate::types::{Created, ErrorResponse, MemberResponse, MembersResponse, OkResponse};

/// Create member routes
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/members", get(list_members).post(create_member))
        .route(
            "/api/members/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
}

/// List all members, newest first
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    responses(
        (status = 200, description = "All members", body = MembersResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn list_members(
    State(state): State<AppState>,
    _reader: MemberReader,
) -> AppResult<Json<MembersResponse>> {
    let members = state.member_service.list_members().await?;
    Ok(Json(MembersResponse { members }))
}

/// Get member by ID
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn get_member(
    State(state): State<AppState>,
    _reader: MemberReader,
    id: MemberId,
) -> AppResult<Json<MemberResponse>> {
    let member = state.member_service.get_member(id.0).await?;
    Ok(Json(member.into()))
}

/// Create a member (admin only)
#[utoipa::path(
    post,
    path = "/api/members",
    tag = "Members",
    request_body = MemberPayload,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Unable to save member.", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn create_member(
    State(state): State<AppState>,
    admin: MemberAdmin,
    ValidatedJson(payload): ValidatedJson<MemberPayload>,
) -> AppResult<Created<MemberResponse>> {
    let draft = payload.into_draft()?;
    let member = state
        .member_service
        .create_member(draft)
        .await
        .or_failed("Unable to save member.")?;

    tracing::debug!(by = %admin.0.sub, member_id = member.id, "Create request served");
    Ok(Created(member.into()))
}

/// Overwrite a member (admin only)
#[utoipa::path(
    put,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    request_body = MemberPayload,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Invalid id or validation error", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Unable to update member.", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn update_member(
    State(state): State<AppState>,
    _admin: MemberAdmin,
    id: MemberId,
    ValidatedJson(payload): ValidatedJson<MemberPayload>,
) -> AppResult<Json<MemberResponse>> {
    let draft = payload.into_draft()?;
    let member = state
        .member_service
        .update_member(id.0, draft)
        .await
        .or_failed("Unable to update member.")?;

    Ok(Json(member.into()))
}

/// Delete a member (admin only)
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = "Members",
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted", body = OkResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse),
        (status = 500, description = "Unable to delete member.", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = []))
)]
pub async fn delete_member(
    State(state): State<AppState>,
    _admin: MemberAdmin,
    id: MemberId,
) -> AppResult<Json<OkResponse>> {
    state
        .member_service
        .delete_member(id.0)
        .await
        .or_failed("Unable to delete member.")?;

    Ok(Json(OkResponse::new()))
}
