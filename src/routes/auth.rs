// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password sign-up, sign-in and sign-out.

use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, extract_token, verify_token, SESSION_COOKIE};
use crate::models::IdentityUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct SignOutResponse {
    pub success: bool,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: IdentityUser,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&user, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(token)),
        Json(SessionResponse {
            user_id: user.id,
            email: user.email,
        }),
    ))
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SignUpRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state.identity.sign_up(&body.email, &body.password).await?;
    tracing::info!(user_id = %user.id, "User signed up");
    start_session(&state, jar, user)
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state.identity.sign_in(&body.email, &body.password).await?;
    tracing::info!(user_id = %user.id, "User signed in");
    start_session(&state, jar, user)
}

/// Clears the session cookie. Succeeds even without a valid session.
async fn sign_out(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: axum::http::HeaderMap,
) -> Result<(CookieJar, Json<SignOutResponse>)> {
    let current = extract_token(&jar, &headers)
        .and_then(|token| verify_token(&token, &state.config.jwt_signing_key).ok());

    if let Some(user) = current {
        state.identity.sign_out(&user.user_id).await?;
        tracing::info!(user_id = %user.user_id, "User signed out");
    }

    Ok((
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(SignOutResponse { success: true }),
    ))
}
