//! Test fixtures for integration tests
//!
//! Builder-style session fixtures with faked identities, one per plan
//! tier plus a session carrying a plan string the core does not know.

#![allow(dead_code)]

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use RankBuddy::models::UserSession;

/// Builder for session records used in tests
#[derive(Debug, Clone)]
pub struct TestSession {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub plan: String,
}

impl TestSession {
    pub fn new(plan: &str) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: SafeEmail().fake(),
            display_name: Name().fake(),
            plan: plan.to_string(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    pub fn with_plan(mut self, plan: &str) -> Self {
        self.plan = plan.to_string();
        self
    }

    /// Materialize the wire-format session record
    pub fn session(&self) -> UserSession {
        UserSession {
            user_id: self.user_id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            plan: self.plan.clone(),
            created_at: Utc::now() - Duration::days(30),
        }
    }
}

/// One session fixture per plan tier, plus an unrecognized plan
pub struct SessionFixtures {
    pub free_user: TestSession,
    pub starter_user: TestSession,
    pub professional_user: TestSession,
    pub enterprise_user: TestSession,
    pub unknown_plan_user: TestSession,
}

impl SessionFixtures {
    pub fn new() -> Self {
        Self {
            free_user: TestSession::new("free"),
            starter_user: TestSession::new("starter"),
            professional_user: TestSession::new("professional"),
            enterprise_user: TestSession::new("enterprise"),
            unknown_plan_user: TestSession::new("legacy-gold-2019"),
        }
    }

    pub fn all_sessions(&self) -> Vec<&TestSession> {
        vec![
            &self.free_user,
            &self.starter_user,
            &self.professional_user,
            &self.enterprise_user,
            &self.unknown_plan_user,
        ]
    }
}
