//! Domain layer - Core business entities and rules
//!
//! Members, their validation, session roles and the authorization policy.
//! Nothing here touches the database or HTTP.

pub mod member;
pub mod password;
pub mod policy;
pub mod session;
pub mod validation;

pub use member::{Member, MemberDraft, MemberStatus, UnknownStatus};
pub use password::Password;
pub use policy::{authorize, Action, Denial, Resource};
pub use session::{ExternalIdentity, Role};
pub use validation::{describe_errors, parse_date, FieldOrder, MemberPayload};
