//! Internationalization module
//!
//! This module handles multi-language support for the RankBuddy dashboard.
//! It provides translation dictionaries, locale definitions, and locale-aware
//! formatting of currency amounts, numbers, and dates.

pub mod catalog;
pub mod formatter;
pub mod locale;

// Re-export commonly used i18n components
pub use catalog::{Catalog, LocaleStats, TranslationParams, TranslationStats};
pub use formatter::{CurrencyCode, LocaleFormatter};
pub use locale::{CurrencyPosition, Locale, TextDirection};
