//! Authentication service - session issuance and verification.
//!
//! Sessions are stateless HS256 tokens. The role claim is the only input to
//! authorization; nothing is looked up in the database per request.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    Config, ADMIN_DISPLAY_NAME, ADMIN_EMAIL, ADMIN_SUBJECT, PROVIDER_CREDENTIALS,
    SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};
use crate::domain::{ExternalIdentity, Password, Role};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Tokens without a role claim are plain users
    #[serde(default)]
    pub role: Role,
    pub provider: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 2592000)]
    pub expires_in: i64,
}

/// A freshly signed session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl From<&IssuedSession> for TokenResponse {
    fn from(session: &IssuedSession) -> Self {
        Self {
            access_token: session.token.clone(),
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: session.expires_in,
        }
    }
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check the static admin credentials and issue an admin session
    async fn login(&self, username: &str, password: &str) -> AppResult<IssuedSession>;

    /// Issue a user session for an externally authenticated identity
    fn sign_in_external(&self, identity: ExternalIdentity) -> AppResult<IssuedSession>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService
pub struct Authenticator {
    config: Config,
    admin_password: Password,
}

impl Authenticator {
    /// Hashes the configured admin password once.
    pub fn new(config: Config) -> AppResult<Self> {
        let admin_password = Password::new(&config.admin.password)?;
        Ok(Self {
            config,
            admin_password,
        })
    }

    fn issue(
        &self,
        sub: String,
        name: String,
        email: Option<String>,
        role: Role,
        provider: String,
    ) -> AppResult<IssuedSession> {
        let hours = self.config.jwt_expiration_hours;
        let overflow = || AppError::internal(format!("Session lifetime of {} hours overflows", hours));
        let lifetime = Duration::try_hours(hours).ok_or_else(overflow)?;
        let expires_in = hours.checked_mul(SECONDS_PER_HOUR).ok_or_else(overflow)?;

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Session expiry out of range"))?;

        let claims = Claims {
            sub,
            name,
            email,
            role,
            provider,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(IssuedSession {
            token,
            claims,
            expires_in,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<IssuedSession> {
        // Always run the hash check so a wrong username costs the same
        let hash = self.admin_password.clone();
        let candidate = password.to_string();
        let password_valid = tokio::task::spawn_blocking(move || hash.verify(&candidate))
            .await
            .map_err(|e| AppError::internal(format!("Password check aborted: {}", e)))?;
        let username_valid = username == self.config.admin.username;

        if !(username_valid && password_valid) {
            tracing::warn!(username = %username, "Rejected admin login");
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("Admin signed in");
        self.issue(
            ADMIN_SUBJECT.to_string(),
            ADMIN_DISPLAY_NAME.to_string(),
            Some(ADMIN_EMAIL.to_string()),
            Role::Admin,
            PROVIDER_CREDENTIALS.to_string(),
        )
    }

    fn sign_in_external(&self, identity: ExternalIdentity) -> AppResult<IssuedSession> {
        tracing::info!(
            provider = %identity.provider,
            subject = %identity.subject,
            "External sign-in"
        );

        // External identities are never promoted, whatever their name or email
        self.issue(
            identity.subject,
            identity.name,
            identity.email,
            Role::User,
            identity.provider,
        )
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "unit-test-secret-that-is-long-enough-0123";

    fn config() -> Config {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("JWT_SECRET", SECRET),
            ("ADMIN_USERNAME", "owner"),
            ("ADMIN_PASSWORD", "hunter22"),
        ]);
        Config::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap()
    }

    fn auth() -> Authenticator {
        Authenticator::new(config()).unwrap()
    }

    fn google_identity(name: &str, email: &str) -> ExternalIdentity {
        ExternalIdentity {
            provider: "google".to_string(),
            subject: "10987".to_string(),
            name: name.to_string(),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_issues_admin_session() {
        let auth = auth();
        let session = auth.login("owner", "hunter22").await.unwrap();

        assert!(session.claims.is_admin());
        assert_eq!(session.claims.sub, "admin");
        assert_eq!(session.claims.name, "Gym Admin");
        assert_eq!(session.claims.provider, "credentials");
        assert_eq!(session.expires_in, 720 * 3600);

        let verified = auth.verify_token(&session.token).unwrap();
        assert_eq!(verified, session.claims);
    }

    #[tokio::test]
    async fn test_longest_lifetime_issues_valid_token() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("JWT_SECRET", SECRET),
            ("ADMIN_USERNAME", "owner"),
            ("ADMIN_PASSWORD", "hunter22"),
            ("JWT_EXPIRATION_HOURS", "87600"),
        ]);
        let config = Config::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        let auth = Authenticator::new(config).unwrap();

        let session = auth.login("owner", "hunter22").await.unwrap();

        assert_eq!(session.expires_in, 87_600 * 3600);
        assert!(session.claims.exp > Utc::now().timestamp());
        tokio_test::assert_ok!(auth.verify_token(&session.token));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_credentials() {
        let auth = auth();

        assert!(matches!(
            auth.login("owner", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("admin", "hunter22").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("", "").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_external_identity_is_never_admin() {
        let auth = auth();
        let session = auth
            .sign_in_external(google_identity("Gym Admin", "admin@gym.local"))
            .unwrap();

        assert_eq!(session.claims.role, Role::User);
        assert_eq!(session.claims.provider, "google");
        assert_eq!(auth.verify_token(&session.token).unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_verify_rejects_foreign_signature() {
        let session = auth().login("owner", "hunter22").await.unwrap();

        let other = {
            let vars: HashMap<&str, &str> =
                HashMap::from([("JWT_SECRET", "another-secret-of-sufficient-length-xyz")]);
            Authenticator::new(Config::from_vars(|n| vars.get(n).map(|v| v.to_string())).unwrap())
                .unwrap()
        };

        assert!(matches!(other.verify_token(&session.token), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            name: "Gym Admin".to_string(),
            email: None,
            role: Role::Admin,
            provider: "credentials".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_missing_role_claim_defaults_to_user() {
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::default(),
            &serde_json::json!({
                "sub": "x",
                "name": "Someone",
                "provider": "google",
                "iat": now,
                "exp": now + 600,
            }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let claims = auth().verify_token(&token).unwrap();
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.email, None);
    }
}
