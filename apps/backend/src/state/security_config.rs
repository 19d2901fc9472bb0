use jsonwebtoken::Algorithm;

/// JWT verification settings for the websocket authenticate handshake.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret used to sign and verify access tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"belote_test_secret_do_not_ship".to_vec())
    }
}
