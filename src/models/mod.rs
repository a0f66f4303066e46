//! Data models module
//!
//! This module contains the data structures shared across services:
//! plan tiers, the read-only session record, and quota resources.

pub mod plan;
pub mod quota;
pub mod session;

// Re-export commonly used models
pub use plan::PlanTier;
pub use quota::{
    plan_limit, AuditUsageRecord, KeywordUsageRecord, QuotaLimit, ResetPolicy, ResourceKind,
};
pub use session::UserSession;
