//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use catalog::CatalogError;
use shared::{component_warn, logging::ComponentId, SharedError};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebServerError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        WebServerError::InvalidRequest {
            details: details.into(),
        }
    }

    /// HTTP status a handler failure is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::Catalog(error) => match error {
                CatalogError::SourceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                CatalogError::UnknownCreature { .. } => StatusCode::NOT_FOUND,
                CatalogError::NotLoaded => StatusCode::CONFLICT,
                CatalogError::Shared(_) | CatalogError::Json { .. } => StatusCode::BAD_REQUEST,
                CatalogError::DetailUnavailable { .. } | CatalogError::EvolutionUnavailable { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
            WebServerError::InvalidRequest { .. } | WebServerError::Shared(_) => StatusCode::BAD_REQUEST,
            WebServerError::ServerStartup(_) | WebServerError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            component_warn!(ComponentId::current(), "Request failed with {}: {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
