//! # HTTP API
//!
//! JSON surface over the resolvers. Every handler is a thin adapter; the
//! partial-failure policy lives in `pokedex_core`.

pub mod pokemon;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pokedex_core::catalog::ErrorKind;
use pokedex_core::{CatalogError, Resolver};
use serde::Serialize;
use std::sync::Arc;

/// Application state
pub struct AppState {
    pub resolver: Resolver,
}

pub type SharedState = Arc<AppState>;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

/// Handler failure
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    BadRequest(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Upstream | ErrorKind::MalformedResponse => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Catalog(e) => match e.kind() {
                ErrorKind::NotFound => "not_found",
                ErrorKind::Upstream => "upstream_error",
                ErrorKind::MalformedResponse => "malformed_response",
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let error = match self {
            ApiError::BadRequest(message) => message,
            ApiError::Catalog(e) => {
                if status == StatusCode::BAD_GATEWAY {
                    tracing::warn!(error = %e, "Catalog request failed");
                }
                e.to_string()
            }
        };
        (status, Json(ErrorBody { error, kind })).into_response()
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
}

async fn health() -> impl IntoResponse {
    Json(Health {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", pokemon::pokemon_routes())
        .with_state(state)
}
