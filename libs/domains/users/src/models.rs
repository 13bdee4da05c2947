use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity - an account document stored in MongoDB.
///
/// The `email` field carries a unique index; see
/// [`MongoUserRepository::ensure_indexes`](crate::mongodb::MongoUserRepository::ensure_indexes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    /// Argon2 password hash. Persisted with the document; API responses
    /// use [`Identity`]/[`RegisteredUser`], which never carry it.
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn new(email: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: ObjectId::new(),
            email,
            password_hash,
            is_admin,
        }
    }
}

/// DTO for account registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 300))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// DTO for login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 300))]
    pub password: String,
}

/// Public account identity; carries no password material
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Identity {
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Registration result returned to the client
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}
