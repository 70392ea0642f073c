//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::any::Any;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::response::{IntoResponse, Response};
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::core::{Config, Result, ServerState};
use crate::db::DbService;
use crate::utils::{AppError, ErrorCode};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP 请求日志中间件
///
/// 复用客户端的 `x-request-id`，没有则生成 UUID，并写回响应头
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let started = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    tracing::info!(
        target: "http_access",
        request_id = %request_id,
        latency_ms = started.elapsed().as_millis() as u64,
        "{} {} {}",
        method,
        uri,
        status
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

/// Panic 转 500，细节只写日志
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    AppError::new(ErrorCode::InternalError).into_response()
}

/// 未匹配的路由 (静态文件也不存在)
async fn route_not_found() -> AppError {
    AppError::with_message(ErrorCode::NotFound, "Route not found")
}

/// 路径存在但方法不匹配
async fn method_not_allowed() -> AppError {
    AppError::new(ErrorCode::MethodNotAllowed)
}

/// Build the full application: routes, static files, middleware, state
///
/// Used by [`Server::run`] and by the integration tests.
pub fn build_app(state: ServerState) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).not_found_service(route_not_found.into_service());
    let body_limit = state.config.max_body_bytes;

    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::bookings::router())
        .merge(crate::api::products::router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // outermost: access log sees every response, including panics
                .layer(middleware::from_fn(log_request))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn new(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C / SIGTERM, then drain connections and close the database
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let app = build_app(self.state.clone());

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        tokio::spawn(async move {
            shutdown_signal().await;
            tracing::info!(grace_ms = grace.as_millis() as u64, "Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(grace));
        });

        tracing::info!("🚀 Starting HTTP server on {}", addr);
        let served = axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await;

        DbService::from(self.state.db).close().await;

        served?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
