// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password identity providers.
//!
//! Failures are reported as [`AppError::Identity`] carrying a message that
//! can be shown to the user as is.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{AppError, Result};
use crate::models::IdentityUser;

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser>;

    /// Provider-side sign-out. The session cookie is cleared by the caller.
    async fn sign_out(&self, user_id: &str) -> Result<()>;
}

struct Account {
    id: String,
    email: String,
    /// bcrypt hash, salt included
    password_hash: String,
}

/// Accounts held in process memory. Used for local runs and tests.
pub struct MemoryIdentity {
    /// Keyed by lowercased email
    accounts: DashMap<String, Account>,
    cost: u32,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific bcrypt work factor.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            accounts: DashMap::new(),
            cost,
        }
    }
}

async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing error: {}", e)))
}

async fn verify_password(password: &str, hash: String) -> Result<bool> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e))
        })?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification error: {}", e)))
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Identity(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let key = email.trim().to_lowercase();
        let exists = || AppError::Identity("An account with this email already exists".to_string());
        if self.accounts.contains_key(&key) {
            return Err(exists());
        }

        // Hash before taking the entry so no map lock is held across the await
        let password_hash = hash_password(password, self.cost).await?;
        let entry = match self.accounts.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => return Err(exists()),
            dashmap::mapref::entry::Entry::Vacant(vacant) => vacant,
        };

        let account = Account {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email: email.trim().to_string(),
            password_hash,
        };
        let user = IdentityUser {
            id: account.id.clone(),
            email: account.email.clone(),
        };
        entry.insert(account);

        tracing::info!(user_id = %user.id, "Created account");
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityUser> {
        let invalid = || AppError::Identity("Invalid email or password".to_string());

        let (user, password_hash) = {
            let account = self
                .accounts
                .get(&email.trim().to_lowercase())
                .ok_or_else(invalid)?;
            let user = IdentityUser {
                id: account.id.clone(),
                email: account.email.clone(),
            };
            (user, account.password_hash.clone())
        };

        if !verify_password(password, password_hash).await? {
            tracing::warn!(user_id = %user.id, "Invalid password");
            return Err(invalid());
        }
        Ok(user)
    }

    async fn sign_out(&self, user_id: &str) -> Result<()> {
        tracing::debug!(user_id, "Signed out");
        Ok(())
    }
}
