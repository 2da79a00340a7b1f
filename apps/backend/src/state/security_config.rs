use jsonwebtoken::Algorithm;

/// Configuration for token signing and verification.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying access tokens
    pub jwt_secret: Vec<u8>,
    /// Token algorithm (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
