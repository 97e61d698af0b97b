//! Signed-in user identity.

use serde::{Deserialize, Serialize};

/// User as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Stable user id (also used as the settings document ID)
    pub id: String,
    pub email: String,
}
