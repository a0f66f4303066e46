//! Subscription plan tiers
//!
//! The plan tier is a read-only signal supplied by the session record.
//! It is used solely to look up quota limits, so the mapping from raw
//! plan strings must be total: anything unrecognized falls back to the
//! most restrictive tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Subscription levels, most restrictive first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Starter,
    Professional,
    Enterprise,
}

impl PlanTier {
    /// All tiers, for limit-table coverage checks and overview displays
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Professional,
        PlanTier::Enterprise,
    ];

    /// Map a raw plan string to a tier. Case-insensitive; unrecognized
    /// values map to `Free` so a bad upstream value can only tighten
    /// limits, never loosen them.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "starter" => PlanTier::Starter,
            "professional" => PlanTier::Professional,
            "enterprise" => PlanTier::Enterprise,
            _ => PlanTier::Free,
        }
    }

    /// Short code used in storage and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Starter => "starter",
            PlanTier::Professional => "professional",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// Translation key for the tier's display name
    pub fn display_key(&self) -> String {
        format!("plans.{}", self.as_str())
    }
}

impl Default for PlanTier {
    fn default() -> Self {
        PlanTier::Free
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
