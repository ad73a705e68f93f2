use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde_json::json;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // User-correctable input
    #[error("{0}")]
    Validation(String),
    // Uniqueness violations, either pre-checked or reported by the store
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    // Email and payment providers
    #[error("Upstream service error")]
    Dependency(#[source] anyhow::Error),

    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),
    #[error("Internal Server Error")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Dependency(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Dependency(e) => {
                tracing::error!(error.cause_chain = ?e, "Upstream service failed");
            }
            Self::Database(e) => {
                tracing::error!(error.cause_chain = ?e, "Database error");
            }
            Self::Other(e) => {
                tracing::error!(error.cause_chain = ?e, "Unexpected error");
            }
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}
