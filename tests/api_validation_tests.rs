// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::http::StatusCode;
use cyber_fitness_tracker::db::collections;
use cyber_fitness_tracker::db::MemoryStore;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{body_json, create_test_app, get_request, json_request, test_state, wednesday};

#[tokio::test]
async fn test_unknown_day_rejected() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/week/days/funday",
            "u1",
            json!({ "exercises": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["details"], "Unknown day: funday");
}

#[tokio::test]
async fn test_non_positive_duration_rejected_and_nothing_written() {
    let store = Arc::new(MemoryStore::new());
    let state = test_state(store.clone(), wednesday());
    let app = cyber_fitness_tracker::routes::create_router(state);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/week/days/monday",
            "u1",
            json!({
                "weight": 70,
                "exercises": [{ "name": "Running", "duration": 0 }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.count(collections::WEEKLY_ROUTINES), 0);
}

#[tokio::test]
async fn test_non_positive_weight_rejected() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/week/days/monday",
            "u1",
            json!({
                "weight": -5,
                "exercises": [{ "name": "Running", "duration": 30 }]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_oversized_weight_and_duration_rejected_and_nothing_written() {
    let store = Arc::new(MemoryStore::new());
    let app = cyber_fitness_tracker::routes::create_router(test_state(store.clone(), wednesday()));

    for body in [
        json!({ "weight": 1e306, "exercises": [{ "name": "Running", "duration": 30, "intensity": "high" }] }),
        json!({ "weight": 70, "exercises": [{ "name": "Running", "duration": 1e306 }] }),
        json!({ "weight": 501, "exercises": [{ "name": "Running", "duration": 30 }] }),
        json!({ "weight": 70, "exercises": [{ "name": "Running", "duration": 1441 }] }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/week/days/monday", "u1", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert_eq!(store.count(collections::WEEKLY_ROUTINES), 0);

    let week = app
        .oneshot(get_request("/api/week", "u1"))
        .await
        .unwrap();
    assert_eq!(week.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_exercise_rejected() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/week/days/monday",
            "u1",
            json!({ "exercises": [{ "name": "Curling", "duration": 30 }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["details"],
        "Unknown exercise name: Curling"
    );
}

#[tokio::test]
async fn test_too_many_exercises_rejected() {
    let (app, _) = create_test_app();
    let exercises: Vec<_> = (0..51)
        .map(|_| json!({ "name": "Yoga", "duration": 5 }))
        .collect();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/week/days/monday",
            "u1",
            json!({ "exercises": exercises }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_calorie_goal_rejected() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/settings",
            "u1",
            json!({ "calorieGoal": -100 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_invalid_routine_date_format() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/routines",
            "u1",
            json!({ "date": "not-a-date", "exercises": [], "totalCalories": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_up_rejects_bad_email_and_short_password() {
    let (app, _) = create_test_app();

    for body in [
        json!({ "email": "not-an-email", "password": "secret1" }),
        json!({ "email": "ok@example.com", "password": "abc" }),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/signup", "anon", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_calorie_preview() {
    let (app, _) = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/calories",
            "u1",
            json!({ "name": "Running", "weight": 70, "duration": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!((body["calories"].as_f64().unwrap() - 305.025).abs() < 1e-9);
    assert_eq!(body["met"], 8.3);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/calories",
            "u1",
            json!({ "name": "Running", "weight": 70, "duration": -1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
