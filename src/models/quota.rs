//! Quota resources, limits, and persisted usage records
//!
//! Both quota-gated resources share one data-driven limit table so the
//! per-plan numbers cannot drift between call sites. The two resources
//! deliberately keep different reset policies: site audits are a
//! monthly allowance, tracked keywords a lifetime one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::PlanTier;

/// Quota-gated resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    SiteAudit,
    TrackedKeyword,
}

/// When a ledger's counter returns to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Counter resets at each calendar month boundary
    Monthly,
    /// Counter accumulates for the life of the account
    Never,
}

impl ResourceKind {
    /// All gated resources, for usage overviews
    pub const ALL: [ResourceKind; 2] = [ResourceKind::SiteAudit, ResourceKind::TrackedKeyword];

    /// Key the resource's ledger is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            ResourceKind::SiteAudit => "usage:audit",
            ResourceKind::TrackedKeyword => "usage:keywords",
        }
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        match self {
            ResourceKind::SiteAudit => ResetPolicy::Monthly,
            ResourceKind::TrackedKeyword => ResetPolicy::Never,
        }
    }

    /// Human-readable name for logs
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::SiteAudit => "site_audit",
            ResourceKind::TrackedKeyword => "tracked_keyword",
        }
    }
}

/// A plan's allowance for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLimit {
    Unlimited,
    Count(u32),
}

impl QuotaLimit {
    /// Conventional integer rendering: `-1` means unlimited
    pub fn as_i64(&self) -> i64 {
        match self {
            QuotaLimit::Unlimited => -1,
            QuotaLimit::Count(n) => *n as i64,
        }
    }

    /// Whether one more consumption is allowed at the given usage
    pub fn permits(&self, used: u32) -> bool {
        match self {
            QuotaLimit::Unlimited => true,
            QuotaLimit::Count(n) => used < *n,
        }
    }

    /// Allowance left at the given usage, saturating at zero
    pub fn remaining(&self, used: u32) -> QuotaLimit {
        match self {
            QuotaLimit::Unlimited => QuotaLimit::Unlimited,
            QuotaLimit::Count(n) => QuotaLimit::Count(n.saturating_sub(used)),
        }
    }
}

/// Limit table for every resource/plan combination.
///
/// `PlanTier::from_code` already folds unknown plan strings to `Free`,
/// so this table is total over everything upstream can send.
pub fn plan_limit(resource: ResourceKind, plan: PlanTier) -> QuotaLimit {
    match (resource, plan) {
        (ResourceKind::SiteAudit, PlanTier::Free) => QuotaLimit::Count(3),
        (ResourceKind::SiteAudit, PlanTier::Starter) => QuotaLimit::Count(15),
        (ResourceKind::SiteAudit, PlanTier::Professional) => QuotaLimit::Count(60),
        (ResourceKind::SiteAudit, PlanTier::Enterprise) => QuotaLimit::Unlimited,
        (ResourceKind::TrackedKeyword, PlanTier::Free) => QuotaLimit::Count(3),
        (ResourceKind::TrackedKeyword, PlanTier::Starter) => QuotaLimit::Count(25),
        (ResourceKind::TrackedKeyword, PlanTier::Professional) => QuotaLimit::Count(250),
        (ResourceKind::TrackedKeyword, PlanTier::Enterprise) => QuotaLimit::Unlimited,
    }
}

/// Persisted audit ledger record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditUsageRecord {
    pub count: u32,
    pub last_reset: DateTime<Utc>,
}

/// Persisted keyword ledger record. Lifetime allowance, no reset window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordUsageRecord {
    pub total_count: u32,
}
