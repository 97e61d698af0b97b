//! User settings (calorie goal) persistence.

use std::sync::Arc;

use crate::db::{collections, from_document, to_document, DocumentStore};
use crate::error::{Result, ValidationError};
use crate::models::{UserSettings, UserSettingsUpdate};

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn DocumentStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stored settings, or the defaults when the user has none yet.
    pub async fn get_settings(&self, user_id: &str) -> Result<UserSettings> {
        let doc = self
            .store
            .get_by_id(collections::USER_SETTINGS, user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to load user settings");
            })?;

        match doc {
            Some(doc) => from_document(doc),
            None => {
                tracing::debug!(user_id, "No settings stored, using defaults");
                Ok(UserSettings::default())
            }
        }
    }

    /// Merge `update` into the user's settings document and return the result.
    pub async fn update_settings(
        &self,
        user_id: &str,
        update: UserSettingsUpdate,
    ) -> Result<UserSettings> {
        if let Some(goal) = update.calorie_goal {
            validate_calorie_goal(goal)?;
        }

        self.store
            .upsert_merge(collections::USER_SETTINGS, user_id, to_document(&update)?)
            .await
            .inspect_err(|e| {
                tracing::error!(user_id, error = %e, "Failed to save user settings");
            })?;

        tracing::info!(user_id, calorie_goal = ?update.calorie_goal, "Updated user settings");
        self.get_settings(user_id).await
    }
}

/// Goals may be zero but never negative.
pub fn validate_calorie_goal(goal: f64) -> std::result::Result<f64, ValidationError> {
    if goal.is_finite() && goal >= 0.0 {
        Ok(goal)
    } else {
        Err(ValidationError::NegativeCalorieGoal(goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::AppError;
    use crate::models::DEFAULT_CALORIE_GOAL;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_defaults_when_absent() {
        let settings = service().get_settings("nobody").await.unwrap();
        assert_eq!(settings.calorie_goal, DEFAULT_CALORIE_GOAL);
    }

    #[tokio::test]
    async fn test_update_then_read_back() {
        let svc = service();
        let updated = svc
            .update_settings(
                "u1",
                UserSettingsUpdate {
                    calorie_goal: Some(1200.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.calorie_goal, 1200.0);
        assert_eq!(svc.get_settings("u1").await.unwrap().calorie_goal, 1200.0);
        // Other users unaffected
        assert_eq!(
            svc.get_settings("u2").await.unwrap().calorie_goal,
            DEFAULT_CALORIE_GOAL
        );
    }

    #[tokio::test]
    async fn test_zero_goal_allowed_negative_rejected() {
        let svc = service();
        let zero = svc
            .update_settings("u1", UserSettingsUpdate { calorie_goal: Some(0.0) })
            .await
            .unwrap();
        assert_eq!(zero.calorie_goal, 0.0);

        let err = svc
            .update_settings("u1", UserSettingsUpdate { calorie_goal: Some(-1.0) })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NegativeCalorieGoal(_))
        ));
        assert_eq!(svc.get_settings("u1").await.unwrap().calorie_goal, 0.0);
    }
}
