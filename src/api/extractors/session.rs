//! Session guards and path extractors for the member API.
//!
//! These run from request parts, so they are evaluated before any body
//! extractor: role checks answer before the payload is even parsed.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::api::middleware::CurrentSession;
use crate::domain::{authorize, Action, Resource};
use crate::errors::{AppError, AppResult};
use crate::services::Claims;

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .unwrap_or_default())
    }
}

fn authorize_members(parts: &Parts, action: Action) -> AppResult<Claims> {
    let session = parts.extensions.get::<CurrentSession>();
    let role = session.and_then(CurrentSession::role);

    authorize(role, Resource::Members, action)?;

    session
        .and_then(|s| s.claims().cloned())
        .ok_or(AppError::Unauthorized)
}

/// Any signed-in session (member reads)
pub struct MemberReader(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for MemberReader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize_members(parts, Action::Read).map(MemberReader)
    }
}

/// Admin session (member writes)
pub struct MemberAdmin(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for MemberAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize_members(parts, Action::Write).map(MemberAdmin)
    }
}

/// Integer member id taken from the `:id` path segment
#[derive(Debug, Clone, Copy)]
pub struct MemberId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for MemberId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("Invalid id"))?;

        raw.parse::<i32>()
            .map(MemberId)
            .map_err(|_| AppError::bad_request("Invalid id"))
    }
}
