use crate::context::{Forward, HttpContext};
use crate::handlers;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use routelog_core::config::ServerConfig;
use routelog_core::context::Context;
use routelog_core::handler::Middleware;
use routelog_observability::RequestLogger;
use std::sync::Arc;
use tracing::info;

/// Shared state for the demo server.
#[derive(Clone)]
pub struct AppState {
    pub logger: Arc<RequestLogger>,
}

impl AppState {
    pub fn new(logger: RequestLogger) -> Self {
        Self {
            logger: Arc::new(logger),
        }
    }
}

/// Build the axum router with the access log wrapped around every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ok", get(handlers::ok))
        .route("/cont", get(handlers::cont))
        .route("/warn", get(handlers::warn))
        .route("/err", get(handlers::err))
        .fallback(handlers::warn)
        .layer(middleware::from_fn_with_state(state, access_log))
}

/// axum middleware driving the request logger.
pub async fn access_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut ctx = HttpContext::new(request, next);
    // Only a skipped request can come back with an error.
    if let Err(err) = state.logger.handle(&mut ctx, &Forward).await {
        ctx.report_error(&err);
    }
    ctx.into_response()
}

/// Bind and serve until ctrl-c.
pub async fn start(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %config.addr, "Starting demo server");

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Demo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
