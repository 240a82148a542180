//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::domain::{describe_errors, FieldOrder};
use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed JSON becomes a 400 carrying the deserializer's message; failed
/// validation becomes a 400 listing every message in `T::FIELDS` order.
///
/// ```rust,ignore
/// async fn create_member(ValidatedJson(payload): ValidatedJson<MemberPayload>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + FieldOrder,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe_errors(&e, T::FIELDS)))?;

        Ok(ValidatedJson(value))
    }
}
