//! # Axum Helpers
//!
//! Shared plumbing for the Axum services in this workspace.
//!
//! - **[`server`]**: router assembly, health/readiness, graceful shutdown
//! - **[`http`]**: CORS and security-header middleware
//! - **[`errors`]**: the JSON error envelope and [`AppError`]
//! - **[`extractors`]**: [`ValidatedJson`]
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let routes = api_routes.merge(health_router("Hello"));
//! let router = create_router::<ApiDoc>(routes)?;
//! create_production_app(router, &server_config, shutdown_timeout, cleanup).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthCheckResponse, OPENAPI_JSON_PATH, ShutdownCoordinator, create_app,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, error_response};

pub use extractors::ValidatedJson;
