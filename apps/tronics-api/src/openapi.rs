//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tronics API",
        version = "0.1.0",
        description = "Catalog and account REST API over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/auth", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Catalog management endpoints (MongoDB)"),
        (name = "Auth", description = "Account registration and login")
    )
)]
pub struct ApiDoc;
