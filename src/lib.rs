//! RankBuddy Core
//!
//! Localization and usage-quota engine for the RankBuddy SEO analytics
//! dashboard. This library provides translation dictionaries, locale-aware
//! formatting of currency, number, and date values, and plan-based usage
//! ledgers that gate quota-limited actions such as running a site audit or
//! tracking a keyword.

#![allow(non_snake_case)]

pub mod config;
pub mod i18n;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RankBuddyError, Result};

// Re-export main components for easy access
pub use i18n::{Catalog, CurrencyCode, Locale, LocaleFormatter, TextDirection, TranslationParams};
pub use models::{plan_limit, PlanTier, QuotaLimit, ResourceKind, UserSession};
pub use services::{
    LocaleService, QuotaDecision, QuotaService, QuotaStatus, ServiceFactory, SessionService,
};
pub use storage::KvStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
