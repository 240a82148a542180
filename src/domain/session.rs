//! Session roles and externally authenticated identities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// Authorization level carried in the session token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::User => ROLE_USER,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by an external provider after a successful sign-in.
///
/// Carries no role: external identities always become [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Provider name, e.g. `google`
    pub provider: String,
    /// Provider-scoped stable user id
    pub subject: String,
    pub name: String,
    pub email: Option<String>,
}
