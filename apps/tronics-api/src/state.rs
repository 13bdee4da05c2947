//! Application state management.
//!
//! The shared state passed to all request handlers:
//! - Configuration
//! - MongoDB client and database
//! - Token service

use axum_helpers::AuthTokens;
use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned per handler; everything inside is itself cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Token issuance and verification
    pub tokens: AuthTokens,
}
