//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, health_handler, member_handler};
use crate::config::SESSION_COOKIE;
use crate::domain::{Member, MemberPayload, MemberStatus, Role};
use crate::services::TokenResponse;
use crate::types::{ErrorResponse, MemberResponse, MembersResponse, OkResponse};

/// OpenAPI documentation for the membership API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gym Membership API",
        version = "0.1.0",
        description = "Member records for the admin console and the read-only dashboard",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Member endpoints
        member_handler::list_members,
        member_handler::get_member,
        member_handler::create_member,
        member_handler::update_member,
        member_handler::delete_member,
        // Authentication endpoints
        auth_handler::login,
        auth_handler::logout,
        auth_handler::session,
        auth_handler::providers,
        // Health
        health_handler::health,
    ),
    components(
        schemas(
            // Domain types
            Member,
            MemberStatus,
            MemberPayload,
            Role,
            // Envelopes
            MembersResponse,
            MemberResponse,
            OkResponse,
            ErrorResponse,
            // Auth types
            auth_handler::LoginRequest,
            auth_handler::SessionResponse,
            auth_handler::SessionUser,
            auth_handler::ProvidersResponse,
            TokenResponse,
            // Health
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Members", description = "Member records; writes require the admin role"),
        (name = "Authentication", description = "Admin login and session inspection"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Security schemes: bearer token or session cookie
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
