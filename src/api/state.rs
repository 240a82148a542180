//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, GoogleProvider, IdentityProvider};
use crate::services::{AuthService, MemberService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Member use cases
    pub member_service: Arc<dyn MemberService>,
    /// Session issuance and verification
    pub auth_service: Arc<dyn AuthService>,
    /// External sign-in, `None` when not configured
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
    /// Database connection
    pub database: Arc<Database>,
    /// Mark cookies `Secure`
    pub cookie_secure: bool,
}

impl AppState {
    /// Build every service from the database and configuration.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let identity_provider = match config.google.clone() {
            Some(settings) => {
                Some(Arc::new(GoogleProvider::new(settings)?) as Arc<dyn IdentityProvider>)
            }
            None => None,
        };
        let cookie_secure = config.cookie_secure;
        let services = Services::from_connection(database.get_connection(), config)?;

        Ok(Self::new(&services, identity_provider, database, cookie_secure))
    }

    /// Create application state from an existing service container.
    pub fn new<C: ServiceContainer>(
        services: &C,
        identity_provider: Option<Arc<dyn IdentityProvider>>,
        database: Arc<Database>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            member_service: services.members(),
            auth_service: services.auth(),
            identity_provider,
            database,
            cookie_secure,
        }
    }

    /// Names of the sign-in methods currently available.
    pub fn providers(&self) -> Vec<&'static str> {
        let mut providers = vec![crate::config::PROVIDER_CREDENTIALS];
        if let Some(provider) = &self.identity_provider {
            providers.push(provider.name());
        }
        providers
    }
}
