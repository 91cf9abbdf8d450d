//! Token Refresh Use Case
//!
//! Exchanges a valid refresh token for a new access token. The session
//! register is deliberately left alone here; only a fresh login replaces
//! the session row.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::error::AuthResult;

/// Refresh output
pub struct RefreshOutput {
    pub access: String,
}

/// Token refresh use case
pub struct RefreshUseCase {
    config: Arc<AuthConfig>,
}

impl RefreshUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        let issuer = self.config.token_issuer();
        let claims = issuer.validate_refresh(refresh_token)?;

        let access = issuer.issue_access(&claims.sub, &claims.username, &claims.role)?;

        Ok(RefreshOutput { access })
    }
}
