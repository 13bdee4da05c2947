//! Products API routes
//!
//! Wires the products domain to HTTP routes. The whole router sits behind
//! bearer authentication; the domain router gates delete on the admin
//! claim itself.

use axum::{middleware, Router};
use axum_helpers::bearer_auth;
use domain_products::{handlers, MongoProductRepository, ProductService};

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);

    handlers::router(service).layer(middleware::from_fn_with_state(
        state.tokens.clone(),
        bearer_auth,
    ))
}
