use axum::{Json, Router, http::StatusCode, routing::get};
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

/// A boxed dependency check. `Err` carries a description that is logged, never returned.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

pub type HealthCheckResponse = (StatusCode, Json<Value>);

/// Run named checks concurrently and aggregate them into a readiness response.
///
/// ```json
/// { "status": "ready", "database": "connected" }
/// ```
///
/// Any failing check turns the whole response into `503 Service Unavailable`
/// with that check reported as `"disconnected"`.
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<HealthCheckResponse, HealthCheckResponse> {
    let (names, futures): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut body = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let status = match result {
            Ok(()) => "connected",
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                all_healthy = false;
                "disconnected"
            }
        };
        body.insert(name.to_string(), json!(status));
    }

    body.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );

    if all_healthy {
        Ok((StatusCode::OK, Json(Value::Object(body))))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(Value::Object(body))))
    }
}

/// Liveness route: `GET /health` answers `200` with `greeting` as plain text.
pub fn health_router(greeting: &'static str) -> Router {
    Router::new().route("/health", get(move || async move { greeting }))
}
