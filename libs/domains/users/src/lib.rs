//! Users Domain
//!
//! Account management over MongoDB: registration with a unique email
//! index, Argon2 password hashing, login issuing short-lived bearer
//! tokens.
//!
//! The layering matches the other domains: handlers over a service over a
//! repository trait with MongoDB and in-memory implementations.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{AuthTokens, JwtConfig};
//! use domain_users::{handlers, mongodb::MongoUserRepository, service::UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("tronics");
//!
//! let repository = MongoUserRepository::new(db);
//! repository.ensure_indexes().await?;
//!
//! let tokens = AuthTokens::new(&JwtConfig::new("a-real-secret-of-at-least-32-chars!"));
//! let service = UserService::new(repository, tokens);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{Credentials, Identity, RegisterUser, RegisteredUser, User};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
