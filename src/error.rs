//! Typed errors and HTTP mapping.

use crate::response::error_body;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub use crate::config::ConfigError;

/// Route a storage failure happened on; picks the fixed 500 message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to retrieve artisans",
            Operation::Fetch => "Failed to fetch artisan",
            Operation::Create => "Failed to add artisan",
            Operation::Update => "Failed to update artisan",
            Operation::Delete => "Failed to delete artisan",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("ID must be a number.")]
    InvalidId,
    #[error("Fields \"nom\" and \"profession\" are required.")]
    MissingRequiredFields,
    #[error("No fields to update.")]
    NoFieldsToUpdate,
    #[error("Malformed JSON body.")]
    InvalidJson,
    #[error("Artisan not found.")]
    NotFound,
    #[error("{}", .op.failure_message())]
    Storage {
        op: Operation,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Adapter for `map_err`: tags a storage error with the route it failed on.
    pub fn storage(op: Operation) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Storage { op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId
            | AppError::MissingRequiredFields
            | AppError::NoFieldsToUpdate
            | AppError::InvalidJson => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage detail goes to the log only; the caller sees the fixed message.
        if let AppError::Storage { op, source } = &self {
            tracing::error!(operation = ?op, error = %source, "{}", op.failure_message());
        }
        (self.status(), Json(error_body(self.to_string()))).into_response()
    }
}
