//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web
//! applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT token issuance/verification and auth middleware
//! - **[`errors`]**: Structured error responses
//! - **[`extractors`]**: Custom extractors (validated JSON)
//! - **[`http`]**: Correlation-id propagation middleware
//! - **[`server`]**: Server setup, graceful shutdown

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    bearer_auth, require_admin, AuthError, AuthTokens, JwtConfig, TokenClaims, AUTH_TOKEN_HEADER,
    TOKEN_TTL_SECS,
};

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export correlation middleware
pub use http::{propagate_correlation_id, CorrelationId, CORRELATION_ID_HEADER};

// Re-export server helpers
pub use server::{create_app, create_router, shutdown_signal};
