use std::any::Any;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::middleware::{require_admin, require_auth, track_metrics};
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod payments;
pub mod providers;
pub mod reviews;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "system", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::healthy(env!("CARGO_PKG_VERSION")))
}

pub async fn metrics() -> Result<Response, ApiError> {
    let body = common::metrics::render()
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "handler panicked");
    let body = serde_json::json!({"error": {"message": "Internal server error", "status": 500}});
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// Build the full application router, including public, protected, and admin routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/auth/login", post(auth::login))
        .route("/api/providers", get(providers::list))
        .route("/api/providers/:id", get(providers::get))
        .route("/api/reviews/provider/:id", get(reviews::list_for_provider));

    // Any valid session
    let authenticated = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/users/:id", get(users::get).put(users::update))
        .route("/api/providers", post(providers::create))
        .route("/api/providers/:id", put(providers::update))
        .route("/api/bookings", get(bookings::list).post(bookings::create))
        .route("/api/bookings/:id", get(bookings::get).delete(bookings::cancel))
        .route("/api/bookings/:id/status", put(bookings::set_status))
        .route("/api/payments/create-intent", post(payments::create_intent))
        .route("/api/payments/confirm", post(payments::confirm))
        .route("/api/reviews", post(reviews::create))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes: require_admin runs after require_auth has injected claims
    let admin_routes = Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id/block", put(users::toggle_block))
        .route("/api/providers/:id/approve", put(providers::approve))
        .route("/api/admin/stats", get(admin::stats))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Compose
    public
        .merge(authenticated)
        .merge(admin_routes)
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
