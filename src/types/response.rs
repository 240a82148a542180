use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Member;

/// Error body shared by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Forbidden")]
    pub error: String,
}

/// Member collection envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct MembersResponse {
    pub members: Vec<Member>,
}

/// Single member envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub member: Member,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self { member }
    }
}

/// Acknowledgement body (`{"ok": true}`)
#[derive(Debug, Serialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Created response helper (201 with JSON body)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
