use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token time-to-live. Short expiry bounds the blast radius of a leaked
/// token; there is no refresh mechanism.
pub const TOKEN_TTL_SECS: i64 = 900; // 15 minutes

/// JWT claims structure.
///
/// The `admin` flag is a required claim: a token missing it fails
/// verification as [`AuthError::Invalid`] rather than surfacing as a type
/// error downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user email)
    pub sub: String,
    /// Authorization flag, mirrors the account's admin status
    pub admin: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Errors produced by token issuance and verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Unable to sign token: {0}")]
    Signing(String),
}

/// Stateless HS256 token issuance and verification over a shared secret.
#[derive(Clone)]
pub struct AuthTokens {
    secret: String,
}

impl AuthTokens {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Issue a signed token for the given subject, expiring in 15 minutes.
    pub fn issue(&self, subject: &str, admin: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            admin,
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token's signature, shape, and expiry, and decode its claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Invalid,
        })?;

        Ok(token_data.claims)
    }
}
