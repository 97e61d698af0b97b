// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Input rejected at the edit boundary, before it reaches the calorie engine
/// or the document store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Duration must be greater than zero (got {0})")]
    NonPositiveDuration(f64),

    #[error("Weight must be greater than zero (got {0})")]
    NonPositiveWeight(f64),

    #[error("Duration must be at most 1440 minutes (got {0})")]
    DurationTooLong(f64),

    #[error("Weight must be at most 500 kg (got {0})")]
    WeightTooLarge(f64),

    #[error("Calories must be a finite number (got {0})")]
    NonFiniteCalories(f64),

    #[error("Calorie goal must not be negative (got {0})")]
    NegativeCalorieGoal(f64),

    #[error("Unknown exercise name: {0}")]
    UnknownExercise(String),

    #[error("Unknown day: {0}")]
    UnknownDay(String),

    #[error("No exercise with id {0} in this day")]
    ExerciseNotFound(String),

    #[error("{0}")]
    InvalidInput(String),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Sign-in/sign-up failures; the message is meant for the end user.
    #[error("{0}")]
    Identity(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Identity(_) => (StatusCode::UNAUTHORIZED, "identity_error"),
            AppError::Database(_) => (StatusCode::SERVICE_UNAVAILABLE, "database_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();

        let details = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Identity(msg) => {
                Some(msg.clone())
            }
            AppError::Validation(err) => Some(err.to_string()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                // Every store failure is retryable by re-issuing the request.
                Some("Failed to reach the routine store, please retry".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
            AppError::Unauthorized | AppError::InvalidToken => None,
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
