//! API module
//!
//! Contains the HTTP request handlers and the router that wires them to
//! their paths.

pub mod health;
pub mod lists;

use crate::state::AppState;
use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/lists",
            get(lists::get_all_lists).post(lists::create_todo_list),
        )
        .route(
            "/api/lists/:list_id",
            get(lists::get_list).delete(lists::delete_list),
        )
        .route("/api/lists/:list_id/items", post(lists::create_item))
        .route(
            "/api/lists/:list_id/items/:item_id",
            delete(lists::delete_item),
        )
        .route(
            "/api/lists/:list_id/checked_state",
            patch(lists::set_checked_state),
        )
        // request_id must wrap the handlers before tracing and CORS
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
