//! Usage quota ledger service
//!
//! Tracks consumption of quota-gated resources against plan limits.
//! One state machine serves both resources; the reset policy is the
//! only behavioral difference between them. All transitions for a call
//! run inside one mutex guard, so a check can never interleave with
//! another caller's increment.
//!
//! A denial is an expected outcome returned as a value, not an error:
//! the caller surfaces an upgrade prompt and moves on. Storage failures
//! degrade to in-memory state and never fail a consume.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::{
    plan_limit, AuditUsageRecord, KeywordUsageRecord, PlanTier, QuotaLimit, ResetPolicy,
    ResourceKind,
};
use crate::storage::KvStore;
use crate::utils::helpers::{next_month_start, same_calendar_month};
use crate::utils::logging::{log_quota_decision, log_storage_degraded};

/// In-memory ledger state for one resource
#[derive(Debug, Clone, PartialEq)]
struct LedgerState {
    count: u32,
    /// Start of the current window; `None` for lifetime ledgers
    window_start: Option<DateTime<Utc>>,
}

impl LedgerState {
    fn fresh(resource: ResourceKind, now: DateTime<Utc>) -> Self {
        let window_start = match resource.reset_policy() {
            ResetPolicy::Monthly => Some(now),
            ResetPolicy::Never => None,
        };
        Self {
            count: 0,
            window_start,
        }
    }
}

/// Outcome of a consume attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    /// The action may proceed; the counter was incremented
    Granted { used: u32, remaining: QuotaLimit },
    /// The plan's allowance is exhausted; nothing changed
    Denied { used: u32, limit: QuotaLimit },
}

impl QuotaDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, QuotaDecision::Granted { .. })
    }
}

/// Snapshot of one ledger for dashboard display
#[derive(Debug, Clone)]
pub struct QuotaStatus {
    pub resource: ResourceKind,
    pub plan: PlanTier,
    pub used: u32,
    pub limit: QuotaLimit,
    pub remaining: QuotaLimit,
    pub window_start: Option<DateTime<Utc>>,
    /// First instant of the next window; `None` for lifetime ledgers
    pub resets_at: Option<DateTime<Utc>>,
}

/// Quota ledger service for all gated resources
#[derive(Clone)]
pub struct QuotaService {
    storage: Arc<KvStore>,
    ledgers: Arc<Mutex<HashMap<ResourceKind, LedgerState>>>,
}

impl QuotaService {
    pub fn new(storage: Arc<KvStore>) -> Self {
        Self {
            storage,
            ledgers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether one more consumption of `resource` would be granted.
    ///
    /// Advisory only; `consume` re-evaluates under the same guard it
    /// increments under.
    pub async fn can_consume(&self, resource: ResourceKind, plan: PlanTier) -> bool {
        let now = Utc::now();
        let mut ledgers = self.ledgers.lock().await;
        let state = self.load_and_reset(&mut ledgers, resource, now).await;

        plan_limit(resource, plan).permits(state.count)
    }

    /// Attempt to consume one unit of `resource`.
    ///
    /// Check and increment happen inside one guard, so two rapid calls
    /// can never both succeed on the last remaining slot.
    pub async fn consume(&self, resource: ResourceKind, plan: PlanTier) -> QuotaDecision {
        let now = Utc::now();
        let mut ledgers = self.ledgers.lock().await;
        let mut state = self.load_and_reset(&mut ledgers, resource, now).await;

        let limit = plan_limit(resource, plan);
        if !limit.permits(state.count) {
            log_quota_decision(resource.label(), plan.as_str(), state.count, false);
            return QuotaDecision::Denied {
                used: state.count,
                limit,
            };
        }

        state.count += 1;
        ledgers.insert(resource, state.clone());
        self.persist(resource, &state).await;

        log_quota_decision(resource.label(), plan.as_str(), state.count, true);
        QuotaDecision::Granted {
            used: state.count,
            remaining: limit.remaining(state.count),
        }
    }

    /// Allowance left for `resource` under `plan`
    pub async fn remaining(&self, resource: ResourceKind, plan: PlanTier) -> QuotaLimit {
        let now = Utc::now();
        let mut ledgers = self.ledgers.lock().await;
        let state = self.load_and_reset(&mut ledgers, resource, now).await;

        plan_limit(resource, plan).remaining(state.count)
    }

    /// Full snapshot of one ledger
    pub async fn status(&self, resource: ResourceKind, plan: PlanTier) -> QuotaStatus {
        let now = Utc::now();
        let mut ledgers = self.ledgers.lock().await;
        let state = self.load_and_reset(&mut ledgers, resource, now).await;

        let limit = plan_limit(resource, plan);
        QuotaStatus {
            resource,
            plan,
            used: state.count,
            limit,
            remaining: limit.remaining(state.count),
            window_start: state.window_start,
            resets_at: match resource.reset_policy() {
                ResetPolicy::Monthly => state.window_start.map(next_month_start),
                ResetPolicy::Never => None,
            },
        }
    }

    /// Snapshot of every ledger, for the usage dashboard card
    pub async fn usage_overview(&self, plan: PlanTier) -> Vec<QuotaStatus> {
        let mut overview = Vec::with_capacity(ResourceKind::ALL.len());
        for resource in ResourceKind::ALL {
            overview.push(self.status(resource, plan).await);
        }
        overview
    }

    /// Zero a ledger and persist the cleared state (admin/test hook)
    pub async fn reset(&self, resource: ResourceKind) {
        let mut ledgers = self.ledgers.lock().await;
        let state = LedgerState::fresh(resource, Utc::now());
        ledgers.insert(resource, state.clone());
        self.persist(resource, &state).await;

        info!(resource = resource.label(), "Usage ledger reset");
    }

    // Convenience wrappers for the two dashboard call sites.

    pub async fn can_run_audit(&self, plan: PlanTier) -> bool {
        self.can_consume(ResourceKind::SiteAudit, plan).await
    }

    pub async fn record_audit(&self, plan: PlanTier) -> QuotaDecision {
        self.consume(ResourceKind::SiteAudit, plan).await
    }

    pub async fn audits_remaining(&self, plan: PlanTier) -> QuotaLimit {
        self.remaining(ResourceKind::SiteAudit, plan).await
    }

    pub async fn can_add_keyword(&self, plan: PlanTier) -> bool {
        self.can_consume(ResourceKind::TrackedKeyword, plan).await
    }

    pub async fn add_keyword(&self, plan: PlanTier) -> QuotaDecision {
        self.consume(ResourceKind::TrackedKeyword, plan).await
    }

    pub async fn keywords_remaining(&self, plan: PlanTier) -> QuotaLimit {
        self.remaining(ResourceKind::TrackedKeyword, plan).await
    }

    /// Bring a ledger into memory and apply the month-window reset.
    ///
    /// Must be called with the ledger map locked. The reset is applied
    /// before any quota evaluation, so a counter sitting at the limit
    /// from last month never blocks this month's first action.
    async fn load_and_reset(
        &self,
        ledgers: &mut HashMap<ResourceKind, LedgerState>,
        resource: ResourceKind,
        now: DateTime<Utc>,
    ) -> LedgerState {
        let mut state = match ledgers.get(&resource) {
            Some(state) => state.clone(),
            None => match self.load_persisted(resource).await {
                Some(state) => state,
                None => {
                    // Persist the zero record so the window anchor is
                    // on disk for the next month comparison.
                    let fresh = LedgerState::fresh(resource, now);
                    self.persist(resource, &fresh).await;
                    fresh
                }
            },
        };

        if resource.reset_policy() == ResetPolicy::Monthly {
            if let Some(window_start) = state.window_start {
                if !same_calendar_month(window_start, now) {
                    info!(
                        resource = resource.label(),
                        previous_count = state.count,
                        "Calendar month changed, resetting ledger"
                    );
                    state = LedgerState {
                        count: 0,
                        window_start: Some(now),
                    };
                    self.persist(resource, &state).await;
                }
            }
        }

        ledgers.insert(resource, state.clone());
        state
    }

    /// Read a ledger record from storage. A corrupt record degrades to
    /// "no record" with a warning; it must never fail the caller.
    async fn load_persisted(&self, resource: ResourceKind) -> Option<LedgerState> {
        let key = resource.storage_key();

        match resource {
            ResourceKind::SiteAudit => match self.storage.get::<AuditUsageRecord>(key).await {
                Ok(Some(record)) => Some(LedgerState {
                    count: record.count,
                    window_start: Some(record.last_reset),
                }),
                Ok(None) => None,
                Err(e) => {
                    warn!(key = key, error = %e, "Unreadable ledger record, starting fresh");
                    None
                }
            },
            ResourceKind::TrackedKeyword => {
                match self.storage.get::<KeywordUsageRecord>(key).await {
                    Ok(Some(record)) => Some(LedgerState {
                        count: record.total_count,
                        window_start: None,
                    }),
                    Ok(None) => None,
                    Err(e) => {
                        warn!(key = key, error = %e, "Unreadable ledger record, starting fresh");
                        None
                    }
                }
            }
        }
    }

    /// Best-effort write of a ledger record. In-memory state stays
    /// authoritative for the session when the write fails.
    async fn persist(&self, resource: ResourceKind, state: &LedgerState) {
        let key = resource.storage_key();
        let result = match resource {
            ResourceKind::SiteAudit => {
                let record = AuditUsageRecord {
                    count: state.count,
                    last_reset: state.window_start.unwrap_or_else(Utc::now),
                };
                self.storage.put(key, &record).await
            }
            ResourceKind::TrackedKeyword => {
                let record = KeywordUsageRecord {
                    total_count: state.count,
                };
                self.storage.put(key, &record).await
            }
        };

        if let Err(e) = result {
            log_storage_degraded(key, "put", &e.to_string());
        }
    }
}

impl std::fmt::Debug for QuotaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use chrono::Duration;
    use tempfile::TempDir;

    async fn store_in(dir: &TempDir) -> Arc<KvStore> {
        let config = StorageConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            prefix: "test".to_string(),
        };
        Arc::new(KvStore::open(&config).await.unwrap())
    }

    #[tokio::test]
    async fn test_consume_up_to_limit_then_deny() {
        let dir = tempfile::tempdir().unwrap();
        let service = QuotaService::new(store_in(&dir).await);

        for _ in 0..3 {
            assert!(service
                .consume(ResourceKind::SiteAudit, PlanTier::Free)
                .await
                .is_granted());
        }

        let denied = service.consume(ResourceKind::SiteAudit, PlanTier::Free).await;
        assert_eq!(
            denied,
            QuotaDecision::Denied {
                used: 3,
                limit: QuotaLimit::Count(3),
            }
        );

        // Denial left the counter untouched.
        let status = service.status(ResourceKind::SiteAudit, PlanTier::Free).await;
        assert_eq!(status.used, 3);
    }

    #[tokio::test]
    async fn test_unlimited_plan_never_denies() {
        let dir = tempfile::tempdir().unwrap();
        let service = QuotaService::new(store_in(&dir).await);

        for _ in 0..100 {
            assert!(service
                .consume(ResourceKind::TrackedKeyword, PlanTier::Enterprise)
                .await
                .is_granted());
        }

        assert_eq!(
            service
                .remaining(ResourceKind::TrackedKeyword, PlanTier::Enterprise)
                .await,
            QuotaLimit::Unlimited
        );
    }

    #[tokio::test]
    async fn test_month_rollover_resets_before_check() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        // Ledger at the free limit, anchored in a previous month.
        let stale = AuditUsageRecord {
            count: 3,
            last_reset: Utc::now() - Duration::days(45),
        };
        store
            .put(ResourceKind::SiteAudit.storage_key(), &stale)
            .await
            .unwrap();

        let service = QuotaService::new(store);
        assert!(service.can_run_audit(PlanTier::Free).await);

        let status = service.status(ResourceKind::SiteAudit, PlanTier::Free).await;
        assert_eq!(status.used, 0);
    }

    #[tokio::test]
    async fn test_keyword_ledger_never_resets() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        store
            .put(
                ResourceKind::TrackedKeyword.storage_key(),
                &KeywordUsageRecord { total_count: 3 },
            )
            .await
            .unwrap();

        let service = QuotaService::new(store);

        // Lifetime allowance: no window, no reset, still at the limit.
        assert!(!service.can_add_keyword(PlanTier::Free).await);
        assert!(!service.add_keyword(PlanTier::Free).await.is_granted());

        let status = service
            .status(ResourceKind::TrackedKeyword, PlanTier::Free)
            .await;
        assert_eq!(status.used, 3);
        assert_eq!(status.window_start, None);
        assert_eq!(status.resets_at, None);
    }

    #[tokio::test]
    async fn test_corrupt_record_degrades_to_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        store
            .put(ResourceKind::SiteAudit.storage_key(), &vec!["not", "a", "record"])
            .await
            .unwrap();

        let service = QuotaService::new(store);
        let status = service.status(ResourceKind::SiteAudit, PlanTier::Free).await;
        assert_eq!(status.used, 0);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_memory_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("kv");
        let config = StorageConfig {
            data_dir: data_dir.to_string_lossy().to_string(),
            prefix: "test".to_string(),
        };
        let store = Arc::new(KvStore::open(&config).await.unwrap());
        let service = QuotaService::new(store);

        assert!(service.record_audit(PlanTier::Free).await.is_granted());

        // Pull the data directory out from under the store.
        std::fs::remove_dir_all(&data_dir).unwrap();

        let decision = service.record_audit(PlanTier::Free).await;
        assert_eq!(
            decision,
            QuotaDecision::Granted {
                used: 2,
                remaining: QuotaLimit::Count(1),
            }
        );
        assert_eq!(
            service.audits_remaining(PlanTier::Free).await,
            QuotaLimit::Count(1)
        );
    }

    #[tokio::test]
    async fn test_ledger_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let service = QuotaService::new(store_in(&dir).await);
        assert!(service.add_keyword(PlanTier::Starter).await.is_granted());
        assert!(service.add_keyword(PlanTier::Starter).await.is_granted());
        drop(service);

        let reloaded = QuotaService::new(store_in(&dir).await);
        assert_eq!(
            reloaded.keywords_remaining(PlanTier::Starter).await,
            QuotaLimit::Count(23)
        );
    }

    #[tokio::test]
    async fn test_reset_hook_zeroes_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let service = QuotaService::new(store_in(&dir).await);

        for _ in 0..3 {
            service.consume(ResourceKind::SiteAudit, PlanTier::Free).await;
        }
        assert!(!service.can_run_audit(PlanTier::Free).await);

        service.reset(ResourceKind::SiteAudit).await;
        assert!(service.can_run_audit(PlanTier::Free).await);
    }

    #[tokio::test]
    async fn test_usage_overview_covers_all_resources() {
        let dir = tempfile::tempdir().unwrap();
        let service = QuotaService::new(store_in(&dir).await);

        let overview = service.usage_overview(PlanTier::Professional).await;
        assert_eq!(overview.len(), ResourceKind::ALL.len());

        let audit = &overview[0];
        assert_eq!(audit.resource, ResourceKind::SiteAudit);
        assert_eq!(audit.limit, QuotaLimit::Count(60));
        assert!(audit.resets_at.is_some());
    }
}
