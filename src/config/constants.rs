//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Session
// =============================================================================

/// Default session lifetime in hours (30 days)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 720;

/// Longest accepted session lifetime in hours (10 years)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 87_600;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "gym_session";

/// Cookie carrying the OAuth `state` value between redirect and callback
pub const OAUTH_STATE_COOKIE: &str = "gym_oauth_state";

/// Lifetime of the OAuth `state` cookie
pub const OAUTH_STATE_TTL_MINUTES: i64 = 10;

// =============================================================================
// Roles & Providers
// =============================================================================

/// Role assigned to every non-admin session
pub const ROLE_USER: &str = "user";

/// Administrator role, granted only through the static credentials
pub const ROLE_ADMIN: &str = "admin";

/// Provider name recorded for the static admin login
pub const PROVIDER_CREDENTIALS: &str = "credentials";

/// Provider name recorded for Google sign-ins
pub const PROVIDER_GOOGLE: &str = "google";

/// Default static admin username (local use only)
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Default static admin password (local use only)
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Subject claim of the static admin identity
pub const ADMIN_SUBJECT: &str = "admin";

/// Display name of the static admin identity
pub const ADMIN_DISPLAY_NAME: &str = "Gym Admin";

/// Email of the static admin identity
pub const ADMIN_EMAIL: &str = "admin@gym.local";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default public base URL
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_NAME: &str = "gym_management";

/// Upper bound of pooled connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Connections kept open while idle
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;

// =============================================================================
// Google OAuth2 endpoints
// =============================================================================

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const GOOGLE_SCOPES: &str = "openid email profile";
