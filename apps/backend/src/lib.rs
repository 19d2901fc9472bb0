#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::AppConfig;
pub use error::AppError;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::SessionStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
