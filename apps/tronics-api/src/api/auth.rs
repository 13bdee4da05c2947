//! Auth API routes
//!
//! Registration and login are the only public endpoints besides health.

use axum::Router;
use domain_users::{handlers, MongoUserRepository, UserService};

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository, state.tokens.clone());

    handlers::router(service)
}
