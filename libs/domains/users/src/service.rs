//! User service - registration and login

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum_helpers::AuthTokens;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{Credentials, Identity, RegisterUser, RegisteredUser, User};
use crate::repository::UserRepository;

/// Service layer for account business logic.
///
/// Holds the token service so a successful registration or login can hand
/// the caller a bearer token alongside the public identity.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: AuthTokens,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, tokens: AuthTokens) -> Self {
        Self {
            repository: Arc::new(repository),
            tokens,
        }
    }

    /// Register a new account and issue its first token.
    ///
    /// The pre-insert lookup catches the common duplicate case early; the
    /// unique index resolves the race where two registrations for the same
    /// email pass the lookup, surfacing the loser as a Conflict.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<(RegisteredUser, String)> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(input.email, password_hash, input.is_admin);
        self.repository.insert(&user).await?;

        let token = self
            .tokens
            .issue(&user.email, user.is_admin)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok((RegisteredUser::from(&user), token))
    }

    /// Authenticate an account and issue a token.
    ///
    /// An unknown email is NotFound, distinct from a wrong password, which
    /// is InvalidCredentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: Credentials) -> UserResult<(Identity, String)> {
        credentials
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or_else(|| UserError::NotFound(credentials.email.clone()))?;

        if !verify_password(&credentials.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.email, user.is_admin)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok((Identity::from(&user), token))
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            tokens: self.tokens.clone(),
        }
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum_helpers::JwtConfig;

    fn service() -> UserService<InMemoryUserRepository> {
        let tokens = AuthTokens::new(&JwtConfig::new("test-secret-that-is-long-enough-1234"));
        UserService::new(InMemoryUserRepository::new(), tokens)
    }

    fn register_input(email: &str) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            password: "correct horse battery".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_register_returns_identity_and_token() {
        let service = service();
        let (registered, token) = service
            .register(register_input("alice@example.com"))
            .await
            .unwrap();

        assert_eq!(registered.email, "alice@example.com");
        assert!(!registered.is_admin);
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_register_admin_flag_lands_in_token() {
        let tokens = AuthTokens::new(&JwtConfig::new("test-secret-that-is-long-enough-1234"));
        let service = UserService::new(InMemoryUserRepository::new(), tokens.clone());

        let mut input = register_input("root@example.com");
        input.is_admin = true;

        let (_, token) = service.register(input).await.unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert!(claims.admin);
        assert_eq!(claims.sub, "root@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let service = service();
        service
            .register(register_input("alice@example.com"))
            .await
            .unwrap();

        let result = service.register(register_input("alice@example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_concurrent_registration_yields_one_winner() {
        let service = service();
        let (a, b) = tokio::join!(
            service.register(register_input("alice@example.com")),
            service.register(register_input("alice@example.com")),
        );

        // Exactly one registration succeeds; the loser sees a conflict
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, UserError::DuplicateEmail(_)));
            }
        }
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let result = service()
            .login(Credentials {
                email: "ghost@example.com".to_string(),
                password: "whatever it was".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let service = service();
        service
            .register(register_input("alice@example.com"))
            .await
            .unwrap();

        let result = service
            .login(Credentials {
                email: "alice@example.com".to_string(),
                password: "definitely wrong".to_string(),
            })
            .await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_success_returns_identity() {
        let service = service();
        service
            .register(register_input("alice@example.com"))
            .await
            .unwrap();

        let (identity, token) = service
            .login(Credentials {
                email: "alice@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(identity.email, "alice@example.com");
        assert!(!identity.is_admin);
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_stored_hash_is_not_the_password() {
        let service = service();
        service
            .register(register_input("alice@example.com"))
            .await
            .unwrap();

        let user = service
            .repository
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(user.password_hash, "correct horse battery");
        assert!(user.password_hash.starts_with("$argon2"));
    }
}
