//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod member_repository;

pub(crate) use member_repository::{find_member, insert_member, update_member};
pub use member_repository::{MemberRepository, MemberStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
