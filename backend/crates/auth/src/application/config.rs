//! Application Configuration

use std::time::Duration;

use platform::token::TokenIssuer;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for JWT signing
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Upper bound on student id allocation retries
    pub student_id_max_attempts: u32,
    /// From address on outbound mail
    pub mail_from: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            access_ttl: Duration::from_secs(3600),           // 1 hour
            refresh_ttl: Duration::from_secs(24 * 3600),     // 1 day
            student_id_max_attempts: 32,
            mail_from: "no-reply@produit.academy".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random JWT secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Build the token issuer backed by this config
    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            &self.jwt_secret,
            self.access_ttl.as_secs() as i64,
            self.refresh_ttl.as_secs() as i64,
        )
    }
}
