//! Liveness and readiness endpoints

use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{HealthCheckFuture, HealthCheckResponse, health_router, run_health_checks};
use database::postgres::check_health;
use serde_json::{Value, json};

use crate::state::AppState;

pub const GREETING: &str = "Hola from Product Service.";

/// `GET /ready`: 200 when the database answers, 503 otherwise.
async fn ready(State(state): State<AppState>) -> HealthCheckResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    let (status, Json(mut body)) = match run_health_checks(checks).await {
        Ok(response) | Err(response) => response,
    };

    if let Value::Object(ref mut map) = body {
        map.insert("service".to_string(), json!(state.config.app.name));
        map.insert("version".to_string(), json!(state.config.app.version));
    }

    (status, Json(body))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
        .merge(health_router(GREETING))
}
