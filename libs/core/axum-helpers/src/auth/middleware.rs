//! Request authentication and authorization middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use super::jwt::{AuthError, AuthTokens, TokenClaims};
use crate::errors::AppError;

/// Header carrying the bearer token on protected routes (and the issued
/// token on auth responses).
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) => AppError::InternalServerError(msg),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

/// Extract the bearer token from the auth header: "Bearer <token>"
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Invalid)
}

/// Bearer-token authentication middleware.
///
/// Rejects the request with 401 when the token is missing, malformed, or
/// expired. On success the verified [`TokenClaims`] are inserted into the
/// request extensions for downstream handlers and middleware.
pub async fn bearer_auth(
    State(tokens): State<AuthTokens>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = tokens.verify(token).inspect_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin authorization middleware. Must run after [`bearer_auth`].
///
/// Rejects with 403 when the verified claims lack the admin flag, and with
/// 401 when no claims are present at all (route misconfiguration or the
/// auth stage was skipped).
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<TokenClaims>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !claims.admin {
        return Err(AppError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
