pub mod handlers;
mod middleware;
pub mod types;

pub use handlers::AppState;
pub use middleware::REQUEST_ID_HEADER;

use crate::{
    Result,
    analysis::ImageAnalysisProxy,
    config::{Config, ServerConfig},
};
use axum::{
    Json, Router,
    body::Body,
    extract::DefaultBodyLimit,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{any::Any, net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use types::ErrorResponse;

pub async fn run(config: Config) -> Result<()> {
    let proxy = ImageAnalysisProxy::from_config(&config)?;
    if !proxy.api_key_configured() {
        warn!("GEMINI_API_KEY is not set; analyze requests will fail with a configuration error");
    }

    let app_state = AppState {
        proxy: Arc::new(proxy),
    };

    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Full application: routes plus the middleware stack.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/gemini", post(handlers::analyze))
        .route("/gemini-vision", post(handlers::analyze))
        .fallback(handlers::not_found)
        .with_state(state);

    with_layers(routes, config)
}

/// Wraps `routes` in the request-id, tracing, panic and body-limit layers.
pub fn with_layers(routes: Router, config: &ServerConfig) -> Router {
    routes
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(axum::middleware::from_fn(middleware::request_id))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    let ctx = middleware::current_request();
    error!(
        request_id = ctx.as_ref().map(|ctx| ctx.request_id.as_str()).unwrap_or("-"),
        panic = %detail,
        "Request handler panicked"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(ctx.as_ref())),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
