//! Session access service
//!
//! Read-only view over the session record the auth component maintains.
//! This core only needs the plan tier out of it; an absent or unreadable
//! session degrades to the free tier rather than failing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::session::SESSION_KEY;
use crate::models::{PlanTier, UserSession};
use crate::storage::KvStore;

/// Read-only access to the authenticated session
#[derive(Clone)]
pub struct SessionService {
    storage: Arc<KvStore>,
}

impl SessionService {
    pub fn new(storage: Arc<KvStore>) -> Self {
        Self { storage }
    }

    /// Current session record, if one exists and parses
    pub async fn current(&self) -> Option<UserSession> {
        match self.storage.get::<UserSession>(SESSION_KEY).await {
            Ok(Some(session)) => {
                debug!(plan = %session.plan, "Session record loaded");
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Unreadable session record, treating as signed out");
                None
            }
        }
    }

    /// Plan tier for quota lookups; no session means the free tier
    pub async fn plan_tier(&self) -> PlanTier {
        match self.current().await {
            Some(session) => session.plan_tier(),
            None => PlanTier::Free,
        }
    }
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService").finish_non_exhaustive()
    }
}
