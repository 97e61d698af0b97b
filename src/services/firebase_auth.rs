// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Authentication REST client (email/password accounts).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::IdentityUser;
use crate::services::identity::IdentityProvider;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Clone)]
pub struct FirebaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuthClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, IDENTITY_TOOLKIT_URL.to_string())
    }

    /// Point at another endpoint, e.g. the Auth emulator
    /// (`http://localhost:9099/identitytoolkit.googleapis.com/v1`).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn post_account(&self, method: &str, email: &str, password: &str) -> Result<IdentityUser> {
        let url = format!(
            "{}/accounts:{}?key={}",
            self.base_url,
            method,
            urlencoding::encode(&self.api_key)
        );

        let response = self
            .http
            .post(&url)
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(method, error = %e, "Identity request failed");
                AppError::Identity("Could not reach the sign-in service, please retry".to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let code = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_default();
            tracing::warn!(method, %status, code = %code, "Identity request rejected");
            return Err(AppError::Identity(describe_firebase_error(&code)));
        }

        let account: AccountResponse = response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to parse identity response: {}", e))
        })?;

        Ok(IdentityUser {
            id: account.local_id,
            email: account.email,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser> {
        let user = self.post_account("signUp", email, password).await?;
        tracing::info!(user_id = %user.id, "Created account");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser> {
        self.post_account("signInWithPassword", email, password)
            .await
    }

    async fn sign_out(&self, user_id: &str) -> Result<()> {
        // ID tokens are never stored server-side; dropping the session is enough.
        tracing::debug!(user_id, "Signed out");
        Ok(())
    }
}

/// Human-readable text for an Identity Toolkit error code.
///
/// Codes may carry a suffix (`WEAK_PASSWORD : Password should be ...`).
pub fn describe_firebase_error(code: &str) -> String {
    let head = code.split(':').next().unwrap_or("").trim();
    match head {
        "EMAIL_EXISTS" => "An account with this email already exists",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password"
        }
        "INVALID_EMAIL" => "Please enter a valid email address",
        "WEAK_PASSWORD" => "Password should be at least 6 characters",
        "USER_DISABLED" => "This account has been disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, please try again later",
        _ => "Authentication failed",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(
            describe_firebase_error("EMAIL_EXISTS"),
            "An account with this email already exists"
        );
        assert_eq!(
            describe_firebase_error("INVALID_LOGIN_CREDENTIALS"),
            describe_firebase_error("EMAIL_NOT_FOUND")
        );
        assert_eq!(
            describe_firebase_error(
                "WEAK_PASSWORD : Password should be at least 6 characters"
            ),
            "Password should be at least 6 characters"
        );
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe_firebase_error(""), "Authentication failed");
        assert_eq!(describe_firebase_error("OPERATION_NOT_ALLOWED"), "Authentication failed");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(PasswordRequest {
            email: "a@b.co",
            password: "pw",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(body["returnSecureToken"], true);
        assert_eq!(body["email"], "a@b.co");
    }
}
