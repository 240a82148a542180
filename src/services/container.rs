//! Service Container - Centralized service access.
//!
//! Wires the unit of work, member use cases and session issuance from one
//! database connection and the loaded configuration.

use std::sync::Arc;

use super::{AuthService, Authenticator, MemberManager, MemberService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get member service
    fn members(&self) -> Arc<dyn MemberService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    member_service: Arc<dyn MemberService>,
}

impl Services {
    pub fn new(auth_service: Arc<dyn AuthService>, member_service: Arc<dyn MemberService>) -> Self {
        Self {
            auth_service,
            member_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(config)?);
        let member_service = Arc::new(MemberManager::new(uow));

        Ok(Self::new(auth_service, member_service))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn members(&self) -> Arc<dyn MemberService> {
        self.member_service.clone()
    }
}
