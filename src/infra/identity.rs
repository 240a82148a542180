//! External identity providers.
//!
//! Only Google's OAuth2 authorization-code flow is implemented. The trait
//! seam lets the API layer and tests swap in another provider.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::config::{
    GoogleSettings, GOOGLE_AUTHORIZE_URL, GOOGLE_SCOPES, GOOGLE_TOKEN_URL, GOOGLE_USERINFO_URL,
    PROVIDER_GOOGLE,
};
use crate::domain::ExternalIdentity;
use crate::errors::{AppError, AppResult};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth2 identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name recorded in session claims
    fn name(&self) -> &'static str;

    /// URL the browser is redirected to, carrying `state`
    fn authorize_url(&self, state: &str) -> AppResult<String>;

    /// Exchange an authorization code for the signed-in identity
    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity>;
}

#[derive(Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct GoogleProfile {
    sub: String,
    name: Option<String>,
    email: Option<String>,
}

impl From<GoogleProfile> for ExternalIdentity {
    fn from(profile: GoogleProfile) -> Self {
        let name = profile
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| profile.email.clone())
            .unwrap_or_else(|| profile.sub.clone());

        ExternalIdentity {
            provider: PROVIDER_GOOGLE.to_string(),
            subject: profile.sub,
            name,
            email: profile.email,
        }
    }
}

/// Google sign-in over reqwest
pub struct GoogleProvider {
    client: Client,
    settings: GoogleSettings,
}

impl GoogleProvider {
    pub fn new(settings: GoogleSettings) -> AppResult<Self> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        PROVIDER_GOOGLE
    }

    fn authorize_url(&self, state: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            GOOGLE_AUTHORIZE_URL,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", GOOGLE_SCOPES),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )
        .map_err(|e| AppError::internal(format!("Invalid authorize URL: {}", e)))?;

        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> AppResult<ExternalIdentity> {
        let token: TokenExchangeResponse = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("redirect_uri", self.settings.redirect_url.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let profile: GoogleProfile = self
            .client
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(subject = %profile.sub, "Google profile fetched");

        Ok(profile.into())
    }
}
