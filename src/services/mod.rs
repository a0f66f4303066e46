//! Services module
//!
//! This module contains the business logic services

pub mod locale;
pub mod quota;
pub mod session;

// Re-export commonly used services
pub use locale::LocaleService;
pub use quota::{QuotaDecision, QuotaService, QuotaStatus};
pub use session::SessionService;

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::i18n::Catalog;
use crate::storage::KvStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub locale_service: LocaleService,
    pub quota_service: QuotaService,
    pub session_service: SessionService,
    storage: Arc<KvStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized.
    ///
    /// The persisted locale is applied during construction, so callers
    /// never observe a default-locale flash.
    pub async fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let storage = Arc::new(KvStore::open(&settings.storage).await?);
        let catalog = Arc::new(Catalog::new()?);

        let locale_service =
            LocaleService::init(Arc::clone(&storage), Arc::clone(&catalog), &settings.i18n).await?;
        let quota_service = QuotaService::new(Arc::clone(&storage));
        let session_service = SessionService::new(Arc::clone(&storage));

        Ok(Self {
            locale_service,
            quota_service,
            session_service,
            storage,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let storage_healthy = self.storage.health_check().await;
        let catalog_stats = self.locale_service.catalog_stats();

        ServiceHealthStatus {
            storage_healthy,
            catalog_locales: catalog_stats.locales.len(),
            active_locale: self.locale_service.locale().to_string(),
            quota_service_ready: true, // Always ready if constructed
            session_service_ready: true, // Always ready if constructed
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub storage_healthy: bool,
    pub catalog_locales: usize,
    pub active_locale: String,
    pub quota_service_ready: bool,
    pub session_service_ready: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.storage_healthy
            && self.catalog_locales > 0
            && self.quota_service_ready
            && self.session_service_ready
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.storage_healthy {
            issues.push("Key-value storage probe failed".to_string());
        }
        if self.catalog_locales == 0 {
            issues.push("No translation dictionaries loaded".to_string());
        }
        if !self.quota_service_ready {
            issues.push("Quota service not ready".to_string());
        }
        if !self.session_service_ready {
            issues.push("Session service not ready".to_string());
        }

        issues
    }
}
