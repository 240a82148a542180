//! Application route configuration.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth_routes, health, member_routes, page_routes};
use super::middleware::{page_gate, session_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // JSON member API; role checks happen in the handlers' extractors
        .merge(member_routes())
        .nest("/auth", auth_routes())
        // HTML pages behind the prefix gate
        .merge(page_routes().route_layer(middleware::from_fn(page_gate)))
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
