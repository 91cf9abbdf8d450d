//! JWT Token Issuance and Validation
//!
//! Issues short-lived access tokens and longer-lived refresh tokens,
//! both HMAC-signed with a shared secret. Claims carry the user's
//! identity and role so handlers can authorize without a database hit.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token is malformed, has a bad signature, or has expired
    #[error("Invalid or expired token")]
    Invalid,

    /// Token is valid but is not of the expected type
    #[error("Wrong token type: expected {expected}")]
    WrongType { expected: &'static str },

    /// Encoding failed (key or serialization problem)
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// Claims embedded in access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID (unique per token)
    pub jti: String,
    /// Subject (user ID)
    pub sub: String,
    /// Username, for display without a lookup
    pub username: String,
    /// Role code ("student" or "admin")
    pub role: String,
    /// Issued at (unix timestamp, seconds)
    pub iat: i64,
    /// Expiration (unix timestamp, seconds)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

impl Claims {
    pub fn is_access(&self) -> bool {
        self.token_type == "access"
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == "refresh"
    }
}

/// Manages JWT token creation and validation
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenIssuer {
    /// Create a new issuer with the given secret
    pub fn new(secret: &[u8], access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue an access token for the given user
    pub fn issue_access(
        &self,
        user_id: &str,
        username: &str,
        role: &str,
    ) -> Result<String, TokenError> {
        self.issue(user_id, username, role, "access", self.access_ttl_secs)
    }

    /// Issue a refresh token for the given user
    pub fn issue_refresh(
        &self,
        user_id: &str,
        username: &str,
        role: &str,
    ) -> Result<String, TokenError> {
        self.issue(user_id, username, role, "refresh", self.refresh_ttl_secs)
    }

    fn issue(
        &self,
        user_id: &str,
        username: &str,
        role: &str,
        token_type: &str,
        ttl_secs: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + ttl_secs,
            token_type: token_type.to_string(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
                .map_err(|_| TokenError::Invalid)?;
        Ok(data.claims)
    }

    /// Validate a token and require it to be an access token
    pub fn validate_access(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.validate(token)?;
        if !claims.is_access() {
            return Err(TokenError::WrongType { expected: "access" });
        }
        Ok(claims)
    }

    /// Validate a token and require it to be a refresh token
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.validate(token)?;
        if !claims.is_refresh() {
            return Err(TokenError::WrongType { expected: "refresh" });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret-key-for-testing", 3600, 86400)
    }

    #[test]
    fn issue_and_validate_access_token() {
        let issuer = test_issuer();
        let token = issuer.issue_access("user-1", "alice", "student").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "student");
        assert!(claims.is_access());
    }

    #[test]
    fn issue_and_validate_refresh_token() {
        let issuer = test_issuer();
        let token = issuer.issue_refresh("user-1", "alice", "student").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert!(claims.is_refresh());
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn invalid_token_fails_validation() {
        let issuer = test_issuer();
        assert!(issuer.validate("not-a-valid-token").is_err());
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let issuer1 = test_issuer();
        let issuer2 = TokenIssuer::new(b"different-secret", 3600, 86400);

        let token = issuer1.issue_access("user-1", "alice", "admin").unwrap();
        assert!(issuer2.validate(&token).is_err());
    }

    #[test]
    fn refresh_token_rejected_where_access_expected() {
        let issuer = test_issuer();
        let token = issuer.issue_refresh("user-1", "alice", "student").unwrap();

        assert!(matches!(
            issuer.validate_access(&token),
            Err(TokenError::WrongType { expected: "access" })
        ));
        assert!(issuer.validate_refresh(&token).is_ok());
    }
}
