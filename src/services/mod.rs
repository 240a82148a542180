//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod member_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, IssuedSession, TokenResponse};
pub use member_service::{MemberManager, MemberService};
