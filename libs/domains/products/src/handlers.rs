use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::ProductResult;
use crate::models::{AddProductRequest, Product};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(get_product, add_product),
    components(
        schemas(Product, AddProductRequest),
        responses(BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = entity::Model::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Product routes: `GET /{name}` and `POST /`.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(add_product))
        .route("/{name}", get(get_product))
        .with_state(shared_service)
}

/// Get a product by name
#[utoipa::path(
    get,
    path = "/{name}",
    tag = entity::Model::TAG,
    params(
        ("name" = String, Path, description = "Exact product name")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 204, description = "No product with that name"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(name): Path<String>,
) -> ProductResult<Response> {
    let response = match service.get_product(&name).await? {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

/// Add a product
#[utoipa::path(
    post,
    path = "/",
    tag = entity::Model::TAG,
    request_body = AddProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(request): ValidatedJson<AddProductRequest>,
) -> ProductResult<impl IntoResponse> {
    let product = service.add_product(Some(request)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
