//! Authorization policy shared by the page gate and the member API.

use super::session::Role;

/// Protected area of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `/admin` pages
    AdminConsole,
    /// `/dashboard` pages
    Dashboard,
    /// `/api/members` collection
    Members,
}

impl Resource {
    /// Resource guarding a page path, if any.
    ///
    /// Prefixes match on whole path segments: `/admin/x` is guarded,
    /// `/administrator` is not.
    pub fn for_path(path: &str) -> Option<Resource> {
        if has_segment_prefix(path, "/admin") {
            Some(Resource::AdminConsole)
        } else if has_segment_prefix(path, "/dashboard") {
            Some(Resource::Dashboard)
        } else {
            None
        }
    }
}

fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
}

/// Reason a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No valid session
    Unauthenticated,
    /// Session present but role insufficient
    Forbidden,
}

/// Decide whether `role` (None = anonymous) may perform `action` on `resource`.
///
/// Member writes answer `Forbidden` even for anonymous callers so that the
/// API reports 403 for every non-admin mutation.
pub fn authorize(role: Option<Role>, resource: Resource, action: Action) -> Result<(), Denial> {
    match (resource, action, role) {
        (_, _, Some(Role::Admin)) => Ok(()),
        (Resource::Members, Action::Write, _) => Err(Denial::Forbidden),
        (_, _, None) => Err(Denial::Unauthenticated),
        (Resource::AdminConsole, _, Some(Role::User)) => Err(Denial::Forbidden),
        (Resource::Dashboard | Resource::Members, _, Some(Role::User)) => Ok(()),
    }
}
