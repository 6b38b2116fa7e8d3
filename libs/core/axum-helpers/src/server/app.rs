use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Serve `router` until Ctrl+C or SIGTERM.
///
/// # Errors
/// Fails if the listener cannot bind to the configured address or the server
/// stops with an I/O error.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })
}

/// Wrap application routes with the cross-cutting pieces every service gets:
///
/// - the OpenAPI document of `T` at [`OPENAPI_JSON_PATH`]
/// - a JSON 404 fallback
/// - request tracing, security headers, response compression
/// - CORS when `CORS_ALLOWED_ORIGIN` is set
///
/// `apis` is merged at the root and must already have its state applied.
///
/// # Errors
/// Fails if `CORS_ALLOWED_ORIGIN` contains a value that is not a valid header.
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(handlers::get_product, handlers::add_product))]
/// struct ApiDoc;
///
/// let router = create_router::<ApiDoc>(handlers::router(service))?;
/// ```
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let document = T::openapi();

    let router = Router::new()
        .route(
            OPENAPI_JSON_PATH,
            get(move || {
                let document = document.clone();
                async move { Json(document) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = match cors_layer_from_env()? {
        Some(cors) => router.layer(cors),
        None => router,
    };

    Ok(router.layer(CompressionLayer::new()))
}

/// Serve `router` with coordinated shutdown.
///
/// On SIGINT/SIGTERM the server stops accepting connections and drains
/// in-flight requests while `cleanup` runs. `cleanup` is abandoned if it takes
/// longer than `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     if let Err(e) = db.close().await {
///         tracing::warn!("Error closing database pool: {}", e);
///     }
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = spawn_cleanup(coordinator.clone(), shutdown_timeout, cleanup);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator.clone()))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    finish_serving(&coordinator, serve_result, cleanup_handle).await
}

/// Run `cleanup` once shutdown starts, bounded by `shutdown_timeout`.
fn spawn_cleanup<F>(
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        coordinator.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    })
}

/// Wait for cleanup after the server stopped. A server error starts shutdown
/// itself so cleanup runs without waiting for a signal.
async fn finish_serving(
    coordinator: &ShutdownCoordinator,
    serve_result: io::Result<()>,
    cleanup_handle: JoinHandle<()>,
) -> io::Result<()> {
    if serve_result.is_err() {
        coordinator.shutdown();
    }

    if let Err(e) = cleanup_handle.await {
        warn!("Cleanup task failed: {}", e);
    }

    serve_result
}
