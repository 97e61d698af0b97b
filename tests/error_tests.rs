// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use cyber_fitness_tracker::error::{AppError, ValidationError};

async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_status_codes() {
    assert_eq!(
        AppError::Validation(ValidationError::NonPositiveDuration(0.0))
            .status_and_code()
            .0,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AppError::Database("down".to_string()).status_and_code(),
        (StatusCode::SERVICE_UNAVAILABLE, "database_error")
    );
    assert_eq!(
        AppError::NotFound("x".to_string()).status_and_code().0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_validation_error_body_names_the_problem() {
    let (status, body) =
        body_of(ValidationError::UnknownExercise("Curling".to_string()).into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"], "Unknown exercise name: Curling");
}

#[tokio::test]
async fn test_database_error_hides_internals() {
    let (status, body) =
        body_of(AppError::Database("grpc: deadline exceeded at 10.0.0.3".to_string())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("retry"));
    assert!(!details.contains("10.0.0.3"));
}

#[tokio::test]
async fn test_internal_error_has_no_details() {
    let (status, body) = body_of(anyhow::anyhow!("boom").into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none());
}
