use axum_helpers::AuthTokens;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::MongoUserRepository;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB with startup retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // The unique email index is what resolves concurrent registrations
    MongoUserRepository::new(db.clone()).ensure_indexes().await?;

    let tokens = AuthTokens::new(&config.jwt);

    let state = AppState {
        config,
        mongo_client,
        db,
        tokens,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs and the common middleware stack
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes);

    // Start the server with graceful shutdown
    axum_helpers::create_app(router, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tronics API shutdown complete");
    Ok(())
}
