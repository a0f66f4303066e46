//! Test context for unified test setup
//!
//! Provides settings over a temporary data directory plus accessors
//! for the store and a fully wired service factory. The temp directory
//! lives as long as the context, so every test gets isolated storage.

use RankBuddy::config::Settings;
use RankBuddy::models::session::SESSION_KEY;
use RankBuddy::models::UserSession;
use RankBuddy::services::ServiceFactory;
use RankBuddy::storage::KvStore;
use tempfile::TempDir;

/// Unified test context over an isolated data directory
pub struct TestContext {
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Create a context with test settings over a fresh temp directory
    pub fn new() -> Self {
        // Initialize logging once; later calls are no-ops.
        let _ = tracing_subscriber::fmt::try_init();

        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");

        let mut settings = Settings::default();
        settings.storage.data_dir = temp_dir.path().join("data").to_string_lossy().to_string();
        settings.storage.prefix = "test_rankbuddy".to_string();
        settings.logging.file_path = temp_dir.path().join("logs").to_string_lossy().to_string();
        settings.logging.level = "debug".to_string();

        Self { settings, temp_dir }
    }

    /// Open a store over the context's data directory.
    ///
    /// Useful for seeding records before the factory first reads them.
    pub async fn store(&self) -> KvStore {
        KvStore::open(&self.settings.storage)
            .await
            .expect("failed to open test store")
    }

    /// Build a service factory over the context's data directory
    pub async fn factory(&self) -> ServiceFactory {
        ServiceFactory::new(self.settings.clone())
            .await
            .expect("failed to build service factory")
    }

    /// Write a session record so the plan-tier signal reads as `plan`
    pub async fn seed_session(&self, session: &UserSession) {
        self.store()
            .await
            .put(SESSION_KEY, session)
            .await
            .expect("failed to seed session");
    }
}
