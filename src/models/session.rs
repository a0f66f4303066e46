//! Session record
//!
//! The authenticated session blob is owned by the surrounding auth
//! component; this core only reads it to learn the user's plan tier and
//! never writes it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::PlanTier;

/// Storage key for the session record
pub const SESSION_KEY: &str = "session";

/// Read-only view of the authenticated user's session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    /// Raw plan string as written by the auth component
    pub plan: String,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    /// Plan tier for quota lookups. Unrecognized plan strings map to
    /// the free tier.
    pub fn plan_tier(&self) -> PlanTier {
        PlanTier::from_code(&self.plan)
    }
}
