// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Secrets (JWT key, Firebase API key) are injected as environment variables
//! by the deployment, or read from a local `.env` file during development.

use std::env;
use std::str::FromStr;

/// Default body weight used to seed a fresh edit session.
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;

/// Which document store implementation backs the routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND", s.to_string())),
        }
    }
}

/// Which identity provider signs users in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityBackend {
    Firebase,
    Memory,
}

impl FromStr for IdentityBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firebase" => Ok(IdentityBackend::Firebase),
            "memory" => Ok(IdentityBackend::Memory),
            _ => Err(ConfigError::Invalid("IDENTITY_BACKEND", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID hosting Firestore
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Document store implementation
    pub store_backend: StoreBackend,
    /// Identity provider implementation
    pub identity_backend: IdentityBackend,
    /// Body weight (kg) a new edit session starts with
    pub default_body_weight_kg: f64,

    // --- Secrets ---
    /// Firebase Web API key (only needed for the Firebase identity backend)
    pub firebase_api_key: Option<String>,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Config for tests: in-memory backends and a fixed signing key.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            identity_backend: IdentityBackend::Memory,
            default_body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
            firebase_api_key: None,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = env::var("STORE_BACKEND")
            .map(|v| v.parse())
            .unwrap_or(Ok(StoreBackend::Firestore))?;
        let identity_backend = env::var("IDENTITY_BACKEND")
            .map(|v| v.parse())
            .unwrap_or(Ok(IdentityBackend::Firebase))?;

        let firebase_api_key = env::var("FIREBASE_API_KEY")
            .ok()
            .map(|v| v.trim().to_string());
        if identity_backend == IdentityBackend::Firebase && firebase_api_key.is_none() {
            return Err(ConfigError::Missing("FIREBASE_API_KEY"));
        }

        let default_body_weight_kg = match env::var("DEFAULT_BODY_WEIGHT_KG") {
            Ok(raw) => {
                let weight: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("DEFAULT_BODY_WEIGHT_KG", raw.clone()))?;
                if weight <= 0.0 {
                    return Err(ConfigError::Invalid("DEFAULT_BODY_WEIGHT_KG", raw));
                }
                weight
            }
            Err(_) => DEFAULT_BODY_WEIGHT_KG,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend,
            identity_backend,
            default_body_weight_kg,
            firebase_api_key,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
