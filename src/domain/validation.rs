//! Member payload validation.
//!
//! Incoming JSON is checked with `validator` and then converted into a typed
//! [`MemberDraft`]. Every failing field is reported in one combined message.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::member::{Member, MemberDraft, MemberStatus};
use crate::errors::{AppError, AppResult};

const STATUS_MESSAGE: &str = "Status must be one of ACTIVE, PAUSED, CANCELLED";
const START_DATE_MESSAGE: &str = "Invalid start date";
const END_DATE_MESSAGE: &str = "Invalid end date";

/// Types whose validation messages are reported in a fixed field order.
pub trait FieldOrder {
    /// Rust field names, in reporting order.
    const FIELDS: &'static [&'static str];
}

/// Member create/update request body.
///
/// Missing fields deserialize as empty so that they are reported together
/// with every other failing field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberPayload {
    /// Member's full name
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    #[schema(example = "Jane Doe", min_length = 2)]
    pub full_name: String,
    /// Membership plan label
    #[validate(length(min = 2, message = "Membership type must be at least 2 characters long"))]
    #[schema(example = "Premium", min_length = 2)]
    pub membership_type: String,
    /// One of ACTIVE, PAUSED, CANCELLED
    #[validate(custom(function = "validate_status"))]
    #[schema(example = "ACTIVE")]
    pub status: String,
    /// Membership start date
    #[validate(custom(function = "validate_start_date"))]
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    /// Optional end date; empty or null means open-ended
    #[validate(custom(function = "validate_end_date"))]
    #[schema(example = "2024-12-31")]
    pub end_date: Option<String>,
}

impl FieldOrder for MemberPayload {
    const FIELDS: &'static [&'static str] = &[
        "full_name",
        "membership_type",
        "status",
        "start_date",
        "end_date",
    ];
}

impl MemberPayload {
    /// Validate and convert in one step.
    pub fn parse(self) -> AppResult<MemberDraft> {
        self.validate()
            .map_err(|e| AppError::validation(describe_errors(&e, Self::FIELDS)))?;
        self.into_draft()
    }

    /// Convert an already validated payload into a typed draft.
    pub fn into_draft(self) -> AppResult<MemberDraft> {
        let status = self
            .status
            .parse::<MemberStatus>()
            .map_err(|_| AppError::validation(STATUS_MESSAGE))?;

        let start_date =
            parse_date(&self.start_date).ok_or_else(|| AppError::validation(START_DATE_MESSAGE))?;

        let end_date = match self.end_date.as_deref() {
            None | Some("") => None,
            Some(value) => {
                Some(parse_date(value).ok_or_else(|| AppError::validation(END_DATE_MESSAGE))?)
            }
        };

        Ok(MemberDraft {
            full_name: self.full_name,
            membership_type: self.membership_type,
            status,
            start_date,
            end_date,
        })
    }
}

impl From<&Member> for MemberPayload {
    /// Form values for editing a stored member.
    fn from(member: &Member) -> Self {
        Self {
            full_name: member.full_name.clone(),
            membership_type: member.membership_type.clone(),
            status: member.status.as_str().to_string(),
            start_date: member.start_date.to_string(),
            end_date: member.end_date.map(|d| d.to_string()),
        }
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (date taken in its own
/// offset), or a naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Join every validation message into one string, following `order`.
///
/// Fields missing from `order` come last, alphabetically.
pub fn describe_errors(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<(&str, &Vec<ValidationError>)> = field_errors
        .iter()
        .map(|(field, errs)| {
            let name: &str = field.as_ref();
            (name, *errs)
        })
        .collect();

    fields.sort_by_key(|(name, _)| {
        (
            order.iter().position(|f| f == name).unwrap_or(order.len()),
            *name,
        )
    });

    fields
        .into_iter()
        .flat_map(|(name, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", name))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<MemberStatus>()
        .map(|_| ())
        .map_err(|_| invalid("status", STATUS_MESSAGE))
}

fn validate_start_date(value: &str) -> Result<(), ValidationError> {
    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| invalid("start_date", START_DATE_MESSAGE))
}

fn validate_end_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(())
    } else {
        Err(invalid("end_date", END_DATE_MESSAGE))
    }
}
