//! JWT token issuance/verification and request authentication middleware.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{AuthError, AuthTokens, TokenClaims, TOKEN_TTL_SECS};
pub use middleware::{bearer_auth, require_admin, AUTH_TOKEN_HEADER};
