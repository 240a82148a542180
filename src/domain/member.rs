//! Member domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Membership status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberStatus {
    Active,
    Paused,
    Cancelled,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Active,
        MemberStatus::Paused,
        MemberStatus::Cancelled,
    ];

    /// Stored and serialized representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Paused => "PAUSED",
            MemberStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a status outside the three known values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown member status {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for MemberStatus {
    type Err = UnknownStatus;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Member domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "Premium")]
    pub membership_type: String,
    pub status: MemberStatus,
    pub start_date: NaiveDate,
    /// Not checked against `start_date`.
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Mutable fields of this record as a draft.
    pub fn draft(&self) -> MemberDraft {
        MemberDraft {
            full_name: self.full_name.clone(),
            membership_type: self.membership_type.clone(),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Whether the membership is currently running.
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }
}

/// Validated values for every mutable member field.
///
/// Produced by [`MemberPayload`](super::MemberPayload) validation; used for
/// both create and full-overwrite update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub full_name: String,
    pub membership_type: String,
    pub status: MemberStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
