//! Auth Middleware
//!
//! Bearer-token middleware for protected routes. A valid access token
//! puts an [`AuthContext`] into the request extensions; handlers pull it
//! back out with the extractor impl below.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::config::AuthConfig;
use crate::domain::value_object::{UserId, UserRole};
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

/// Identity of the authenticated caller, taken from the access token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
}

impl AuthContext {
    /// Error unless the caller is an admin
    pub fn require_admin(&self) -> AuthResult<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Middleware that requires a valid Bearer access token
pub async fn require_auth(
    axum::extract::State(state): axum::extract::State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return Err(AuthError::MissingToken.into_response()),
    };

    let issuer = state.config.token_issuer();
    let claims = match issuer.validate_access(token) {
        Ok(claims) => claims,
        Err(e) => return Err(AuthError::from(e).into_response()),
    };

    let user_id: UserId = match claims.sub.parse() {
        Ok(id) => id,
        Err(_) => return Err(AuthError::TokenInvalid.into_response()),
    };
    let role = match UserRole::parse(&claims.role) {
        Some(role) => role,
        None => return Err(AuthError::TokenInvalid.into_response()),
    };

    req.extensions_mut().insert(AuthContext {
        user_id,
        username: claims.username,
        role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
