use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    ValidatedJson, AUTH_TOKEN_HEADER,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Credentials, Identity, RegisterUser, RegisteredUser};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(
        schemas(RegisterUser, Credentials, Identity, RegisteredUser),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Account registration and login")
    )
)]
pub struct ApiDoc;

/// Create the auth router. These routes are public; the token they hand
/// out is what the protected routes require.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(shared_service)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created; token in the X-Auth-Token header", body = RegisteredUser),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> Result<impl IntoResponse, crate::error::UserError> {
    let (registered, token) = service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        [(AUTH_TOKEN_HEADER, format!("Bearer {}", token))],
        Json(registered),
    ))
}

/// Log in to an existing account
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Authenticated; token in the X-Auth-Token header", body = Identity),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<impl IntoResponse, crate::error::UserError> {
    let (identity, token) = service.login(credentials).await?;

    Ok((
        StatusCode::CREATED,
        [(AUTH_TOKEN_HEADER, format!("Bearer {}", token))],
        Json(identity),
    ))
}
