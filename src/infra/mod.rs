//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management
//! - External identity providers (Google OAuth2)

pub mod db;
pub mod identity;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use identity::{GoogleProvider, IdentityProvider};
pub use repositories::{MemberRepository, MemberStore};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, TxMemberRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockMemberRepository;
