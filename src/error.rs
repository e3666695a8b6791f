//! Application error taxonomy and HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Variants are a
//! closed set so the transport layer can tell a missing short code apart from
//! an unreachable store without inspecting messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before touching the store.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Normal negative lookup result.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Every allocation attempt collided or failed.
    #[error("{message}")]
    CapacityExhausted { message: String, details: Value },

    /// Backing store could not be reached or the query did not complete.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn capacity_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CapacityExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable identifier used in the `error.code` field of responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::CapacityExhausted { .. } => "capacity_exhausted",
            AppError::StoreUnavailable { .. } => "store_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::CapacityExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable form.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::CapacityExhausted { message, details }
            | AppError::StoreUnavailable { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::NotFound { .. } | AppError::Validation { .. } => {
                tracing::debug!(code = self.code(), "{}", self);
            }
            _ => tracing::error!(code = self.code(), "{}", self),
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

/// SQLSTATE classes for data the database refuses outright: `22` data
/// exception, `23` integrity constraint violation. Resubmitting the same
/// payload cannot succeed.
const REJECTED_DATA_CLASSES: &[&str] = &["22", "23"];

fn rejected_data_code(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;
    let code = db_err.code()?;

    REJECTED_DATA_CLASSES
        .iter()
        .any(|class| code.starts_with(class))
        .then(|| code.into_owned())
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(sqlstate) = rejected_data_code(&e) {
            tracing::warn!(sqlstate = %sqlstate, "Database rejected data: {}", e);
            return AppError::internal(
                "Database rejected the data",
                json!({ "sqlstate": sqlstate }),
            );
        }

        tracing::warn!("Database error: {}", e);
        AppError::store_unavailable("Database error", json!({}))
    }
}

impl From<getrandom::Error> for AppError {
    fn from(e: getrandom::Error) -> Self {
        AppError::internal(
            "Entropy source unavailable",
            json!({ "reason": e.to_string() }),
        )
    }
}
