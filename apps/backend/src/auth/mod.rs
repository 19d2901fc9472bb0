//! Token verification for websocket authentication.

pub mod jwt;

pub use jwt::{mint_access_token, verify_access_token, Claims};
