//! Locale state service
//!
//! Holds the active locale for the session, persists changes, and
//! exposes the translation and formatting facade the dashboard calls.
//! The persisted locale is read during `init`, before the service is
//! handed to any caller, so the first render already uses it.

use std::str::FromStr;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::I18nConfig;
use crate::i18n::{Catalog, Locale, LocaleFormatter, TextDirection, TranslationParams, TranslationStats};
use crate::storage::KvStore;
use crate::utils::errors::Result;
use crate::utils::logging::{log_locale_change, log_storage_degraded};

/// Storage key for the active locale code
pub const LOCALE_KEY: &str = "locale";

/// Locale state manager and i18n facade
#[derive(Clone)]
pub struct LocaleService {
    storage: Arc<KvStore>,
    catalog: Arc<Catalog>,
    supported: Vec<Locale>,
    active: Arc<RwLock<Locale>>,
}

impl LocaleService {
    /// Create the service with the persisted locale already applied.
    ///
    /// An absent, unreadable, or unsupported persisted value falls back
    /// to the configured default. Configuration errors (a default or
    /// supported locale that does not parse) are propagated.
    pub async fn init(
        storage: Arc<KvStore>,
        catalog: Arc<Catalog>,
        config: &I18nConfig,
    ) -> Result<Self> {
        let default_locale = Locale::from_str(&config.default_locale)?;
        let mut supported = Vec::with_capacity(config.supported_locales.len());
        for code in &config.supported_locales {
            supported.push(Locale::from_str(code)?);
        }

        let active = match storage.get::<String>(LOCALE_KEY).await {
            Ok(Some(code)) => match code.parse::<Locale>() {
                Ok(locale) if supported.contains(&locale) => locale,
                _ => {
                    warn!(code = %code, "Persisted locale not supported, using default");
                    default_locale
                }
            },
            Ok(None) => default_locale,
            Err(e) => {
                warn!(error = %e, "Cannot read persisted locale, using default");
                default_locale
            }
        };

        debug!(
            locale = active.as_str(),
            direction = ?active.text_direction(),
            "Locale service initialized"
        );

        Ok(Self {
            storage,
            catalog,
            supported,
            active: Arc::new(RwLock::new(active)),
        })
    }

    /// Currently active locale
    pub fn locale(&self) -> Locale {
        *self.active.read().unwrap()
    }

    /// Layout direction hint for the active locale
    pub fn text_direction(&self) -> TextDirection {
        self.locale().text_direction()
    }

    /// Locales this service accepts in `set_locale`
    pub fn supported_locales(&self) -> &[Locale] {
        &self.supported
    }

    /// Switch the active locale.
    ///
    /// An unknown or unsupported code is ignored and reported as
    /// `false`; UI event handlers must never crash on bad input. The
    /// new value is persisted immediately, best-effort: a failed write
    /// keeps the in-memory change for the rest of the session.
    pub async fn set_locale(&self, code: &str) -> bool {
        let locale = match code.parse::<Locale>() {
            Ok(locale) if self.supported.contains(&locale) => locale,
            _ => {
                warn!(code = code, "Ignoring unsupported locale code");
                return false;
            }
        };

        let previous = {
            let mut active = self.active.write().unwrap();
            let previous = *active;
            *active = locale;
            previous
        };

        let persisted = match self
            .storage
            .put(LOCALE_KEY, &locale.as_str().to_string())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log_storage_degraded(LOCALE_KEY, "put", &e.to_string());
                false
            }
        };

        log_locale_change(previous.as_str(), locale.as_str(), persisted);
        true
    }

    /// Formatter bound to the locale active right now
    pub fn formatter(&self) -> LocaleFormatter {
        LocaleFormatter::new(self.locale())
    }

    /// Resolve a translation key in the active locale
    pub fn t(&self, key: &str) -> String {
        self.catalog.resolve(self.locale(), key)
    }

    /// Resolve a translation key and substitute placeholders
    pub fn t_with(&self, key: &str, params: &TranslationParams) -> String {
        self.catalog.resolve_with(self.locale(), key, params)
    }

    pub fn format_currency(&self, amount: Option<f64>, currency_code: &str) -> String {
        self.formatter().format_currency(amount, currency_code)
    }

    pub fn format_number(&self, n: i64) -> String {
        self.formatter().format_number(n)
    }

    pub fn format_decimal(&self, n: f64, decimals: usize) -> String {
        self.formatter().format_decimal(n, decimals)
    }

    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        self.formatter().format_date(date)
    }

    /// Catalog coverage statistics, for the health report
    pub fn catalog_stats(&self) -> TranslationStats {
        self.catalog.stats()
    }
}

impl std::fmt::Debug for LocaleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleService")
            .field("active", &self.locale())
            .field("supported", &self.supported)
            .finish_non_exhaustive()
    }
}
