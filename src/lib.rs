//! Gym membership service
//!
//! Member records managed by an admin, a read-only dashboard for signed-in
//! users, stateless signed sessions and a role-based page gate.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Members, validation, roles and the authorization policy
//! - **services**: Member use cases and session issuance
//! - **infra**: Database, repositories, unit of work, identity providers
//! - **api**: HTTP handlers, middleware, extractors and routes
//! - **types**: Response envelopes
//! - **utils**: HTML rendering helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Member, MemberStatus, Role};
pub use errors::{AppError, AppResult};
pub use infra::Database;
