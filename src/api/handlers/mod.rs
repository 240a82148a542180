//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod member_handler;
pub mod page_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health;
pub use member_handler::member_routes;
pub use page_handler::page_routes;
