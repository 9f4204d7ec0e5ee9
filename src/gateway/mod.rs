//! HTTP gateway (Axum) for title verification.
//!
//! Thin layer only: request validation, engine dispatch, typed error
//! mapping. This module is primarily used by the `masthead` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::verify_handler;
pub use state::HandlerState;

use crate::embedding::Embedder;
use crate::store::TitleStore;

pub const MASTHEAD_STATUS_HEADER: &str = "X-Masthead-Status";
pub const MASTHEAD_STATUS_HEALTHY: &str = "healthy";
pub const MASTHEAD_STATUS_READY: &str = "ready";
pub const MASTHEAD_STATUS_ERROR: &str = "error";

pub fn create_router_with_state<E, S>(state: HandlerState<E, S>) -> Router
where
    E: Embedder + 'static,
    S: TitleStore + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/verify", post(verify_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub index_entries: usize,
    pub rules: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        MASTHEAD_STATUS_HEADER,
        HeaderValue::from_static(MASTHEAD_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, S>(State(state): State<HandlerState<E, S>>) -> Response
where
    E: Embedder + 'static,
    S: TitleStore + 'static,
{
    let components = ComponentStatus {
        http: MASTHEAD_STATUS_READY,
        index_entries: state.engine.index().len(),
        rules: if state.engine.rules().is_empty() {
            "empty"
        } else {
            "loaded"
        },
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        MASTHEAD_STATUS_HEADER,
        HeaderValue::from_static(MASTHEAD_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
