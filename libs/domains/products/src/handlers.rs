use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    require_admin,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductResult;
use crate::models::{CreateProduct, ProductFilter, ProductResponse, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Outcome of a delete request
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedProducts {
    pub deleted_count: u64,
}

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        find_products,
        create_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse,
            CreateProduct,
            UpdateProduct,
            ProductFilter,
            DeletedProducts
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Catalog management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Cap on request bodies carrying product documents
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the products router with all HTTP endpoints.
///
/// Delete is additionally gated on the admin claim; bearer authentication
/// for the whole router is layered on by the application.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(find_products).post(create_products))
        .route("/{id}", get(get_product).put(update_product))
        .route(
            "/{id}",
            delete(delete_product).route_layer(middleware::from_fn(require_admin)),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(shared_service)
}

/// List products matching the given filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.find(filter).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create a batch of products
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = Vec<CreateProduct>,
    responses(
        (status = 201, description = "Ids of the created products", body = Vec<String>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Json(inputs): Json<Vec<CreateProduct>>,
) -> ProductResult<impl IntoResponse> {
    let ids = service.create_many(inputs).await?;
    let ids: Vec<String> = ids.iter().map(|id| id.to_hex()).collect();
    Ok((StatusCode::CREATED, Json(ids)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (hex)")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.find_one(&id).await?;
    Ok(Json(product.into()))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (hex)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update(&id, input).await?;
    Ok(Json(product.into()))
}

/// Delete a product (admin only)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (hex)")
    ),
    responses(
        (status = 200, description = "Delete executed", body = DeletedProducts),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<DeletedProducts>> {
    let deleted_count = service.delete(&id).await?;
    Ok(Json(DeletedProducts { deleted_count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn app() -> Router {
        router(ProductService::new(InMemoryProductRepository::new()))
    }

    #[tokio::test]
    async fn test_create_within_body_limit() {
        let body = serde_json::json!([{
            "name": "kindle",
            "price": 220,
            "currency": "USD",
            "vendor": "amazon",
            "accessories": ["charger"]
        }]);

        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let body = vec![b'a'; MAX_BODY_BYTES + 1];

        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
