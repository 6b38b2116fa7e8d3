//! Handler tests for the Products domain
//!
//! These run the products router against the in-memory repository and check
//! status codes and JSON bodies, without the application's outer layers.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_widget_scenario() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "Widget", "price": 9.99})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = json_body(response).await;
    assert!(created["id"].as_i64().is_some());
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["price"], 9.99);
    assert_eq!(created["description"], Value::Null);

    // Same create again
    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "Widget", "price": 9.99})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: Value = json_body(response).await;
    assert_eq!(error["error"], "CONFLICT");

    // Fetch it
    let response = app.clone().oneshot(get("/Widget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = json_body(response).await;
    assert_eq!(fetched, created);

    // Unknown name
    let response = app.clone().oneshot(get("/Nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    // Invalid requests
    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "", "price": 1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(json!({"name": "X", "price": -1})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let app = app();
    app.clone()
        .oneshot(post_json(json!({"name": "Gadget", "price": 3.5, "description": "shiny"})))
        .await
        .unwrap();

    let first: Product = json_body(app.clone().oneshot(get("/Gadget")).await.unwrap()).await;
    let second: Product = json_body(app.oneshot(get("/Gadget")).await.unwrap()).await;

    assert_eq!(first, second);
    assert_eq!(first.description.as_deref(), Some("shiny"));
}

#[tokio::test]
async fn test_name_is_trimmed_before_storage() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "  Sprocket ", "price": 2.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response).await;
    assert_eq!(created.name, "Sprocket");

    let response = app
        .clone()
        .oneshot(post_json(json!({"name": "Sprocket", "price": 2.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.oneshot(get("/Sprocket")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_desc_alias_is_accepted() {
    let response = app()
        .oneshot(post_json(json!({"name": "Cog", "price": 1.0, "desc": "small"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Product = json_body(response).await;
    assert_eq!(created.description.as_deref(), Some("small"));
}

#[tokio::test]
async fn test_missing_price_is_bad_request() {
    let response = app()
        .oneshot(post_json(json!({"name": "Cog"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = json_body(response).await;
    assert_eq!(error["details"]["price"][0]["code"], "missing_price");
}

#[tokio::test]
async fn test_missing_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"Widget\", "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_path_name_is_bad_request() {
    let response = app().oneshot(get("/%20%20")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Store that reports every name as free, then rejects the insert, like a
/// concurrent writer taking the name between the lookup and the save.
struct RacingInsertRepository;

#[async_trait::async_trait]
impl ProductRepository for RacingInsertRepository {
    async fn find_by_name(&self, _name: &str) -> ProductResult<Option<Product>> {
        Ok(None)
    }

    async fn save(&self, product: NewProduct) -> ProductResult<Product> {
        Err(ProductError::DuplicateName(product.name))
    }
}

#[tokio::test]
async fn test_store_side_duplicate_is_conflict() {
    let app = handlers::router(ProductService::new(RacingInsertRepository));

    let response = app
        .oneshot(post_json(json!({"name": "Widget", "price": 9.99})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = json_body(response).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "Product with name 'Widget' already exists");
}
