//! Translation catalog
//!
//! This module provides the core dictionary lookup functionality including
//! embedded dictionary loading, nested key resolution, and message formatting.
//!
//! Dictionaries are embedded at compile time, so lookups never touch the
//! filesystem and every build ships with its complete translation set.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::i18n::Locale;
use crate::utils::errors::{RankBuddyError, Result};

const EN_DICTIONARY: &str = include_str!("../../translations/en.json");
const TR_DICTIONARY: &str = include_str!("../../translations/tr.json");

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

/// Embedded translation dictionaries for all supported locales
#[derive(Debug, Clone)]
pub struct Catalog {
    translations: HashMap<Locale, Map<String, Value>>,
}

impl Catalog {
    /// Parse the embedded dictionaries. Fails if any dictionary is not a
    /// JSON object, which indicates a broken build asset.
    pub fn new() -> Result<Self> {
        let mut translations = HashMap::new();
        translations.insert(Locale::En, Self::parse_dictionary(Locale::En, EN_DICTIONARY)?);
        translations.insert(Locale::Tr, Self::parse_dictionary(Locale::Tr, TR_DICTIONARY)?);

        Ok(Self { translations })
    }

    fn parse_dictionary(locale: Locale, source: &str) -> Result<Map<String, Value>> {
        let parsed: Value = serde_json::from_str(source)?;

        match parsed {
            Value::Object(map) => {
                debug!(
                    locale = locale.as_str(),
                    keys = count_keys(&map),
                    "Loaded translation dictionary"
                );
                Ok(map)
            }
            _ => Err(RankBuddyError::Catalog(format!(
                "Dictionary for {} is not a JSON object",
                locale
            ))),
        }
    }

    /// Resolve a translation key for a locale.
    ///
    /// Supports nested keys like "dashboard.quota.title". A key with no
    /// entry in the requested locale resolves to the key itself so the
    /// caller always has something to display.
    pub fn resolve(&self, locale: Locale, key: &str) -> String {
        match self.lookup(locale, key) {
            Some(text) => text,
            None => {
                warn!(locale = locale.as_str(), key = key, "Translation key not found");
                key.to_string()
            }
        }
    }

    /// Resolve a translation key and substitute `{name}` placeholders
    pub fn resolve_with(&self, locale: Locale, key: &str, params: &TranslationParams) -> String {
        let template = self.resolve(locale, key);
        format_message(&template, params)
    }

    /// Whether a key has an entry in the given locale
    pub fn has_key(&self, locale: Locale, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<String> {
        let dictionary = self.translations.get(&locale)?;

        let mut current = dictionary.get(key.split('.').next()?)?;
        for part in key.split('.').skip(1) {
            current = current.get(part)?;
        }

        current.as_str().map(|s| s.to_string())
    }

    /// Keys present in the default locale but absent in `locale`
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let reference = match self.translations.get(&Locale::default()) {
            Some(map) => flatten_keys(map, ""),
            None => return Vec::new(),
        };

        reference
            .into_iter()
            .filter(|key| !self.has_key(locale, key))
            .collect()
    }

    /// Get translation statistics across loaded dictionaries
    pub fn stats(&self) -> TranslationStats {
        let mut stats = TranslationStats {
            locales: Vec::new(),
            total_keys: 0,
        };

        for (locale, dictionary) in &self.translations {
            let key_count = count_keys(dictionary);
            stats.locales.push(LocaleStats {
                code: locale.as_str().to_string(),
                key_count,
            });
            if *locale == Locale::default() {
                stats.total_keys = key_count;
            }
        }

        stats
    }
}

/// Substitute `{name}` placeholders in a template
fn format_message(template: &str, params: &TranslationParams) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Recursively count leaf translation entries
fn count_keys(obj: &Map<String, Value>) -> usize {
    let mut count = 0;
    for value in obj.values() {
        match value {
            Value::Object(nested) => count += count_keys(nested),
            _ => count += 1,
        }
    }
    count
}

/// Collect dot-joined paths of all leaf entries
fn flatten_keys(obj: &Map<String, Value>, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    for (name, value) in obj {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            Value::Object(nested) => keys.extend(flatten_keys(nested, &path)),
            _ => keys.push(path),
        }
    }
    keys
}

/// Translation statistics
#[derive(Debug, Clone)]
pub struct TranslationStats {
    pub locales: Vec<LocaleStats>,
    pub total_keys: usize,
}

/// Per-locale statistics
#[derive(Debug, Clone)]
pub struct LocaleStats {
    pub code: String,
    pub key_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_key() {
        let catalog = Catalog::new().unwrap();

        assert_eq!(catalog.resolve(Locale::En, "common.save"), "Save");
        assert_eq!(catalog.resolve(Locale::Tr, "common.save"), "Kaydet");
    }

    #[test]
    fn test_resolve_nested_key() {
        let catalog = Catalog::new().unwrap();

        assert_eq!(
            catalog.resolve(Locale::En, "dashboard.quota.title"),
            "Usage This Month"
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_key_itself() {
        let catalog = Catalog::new().unwrap();
        let key = "no.such.key";

        assert_eq!(catalog.resolve(Locale::En, key), key);
        assert_eq!(catalog.resolve(Locale::Tr, key), key);
    }

    #[test]
    fn test_partial_path_is_not_a_translation() {
        let catalog = Catalog::new().unwrap();

        // "dashboard.quota" names a subtree, not a leaf entry.
        assert_eq!(catalog.resolve(Locale::En, "dashboard.quota"), "dashboard.quota");
    }

    #[test]
    fn test_message_formatting() {
        let catalog = Catalog::new().unwrap();

        let mut params = TranslationParams::new();
        params.insert("count".to_string(), "5".to_string());
        params.insert("limit".to_string(), "15".to_string());

        let result = catalog.resolve_with(Locale::En, "quota.audits_used", &params);
        assert_eq!(result, "5 of 15 site audits used");
    }

    #[test]
    fn test_unmatched_placeholder_left_intact() {
        let params = TranslationParams::new();
        assert_eq!(format_message("Hello {name}", &params), "Hello {name}");
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let mut params = TranslationParams::new();
        params.insert("q".to_string(), "rust seo".to_string());

        assert_eq!(
            format_message("Results for {q}. Refine {q} to narrow down.", &params),
            "Results for rust seo. Refine rust seo to narrow down."
        );
    }

    #[test]
    fn test_dictionaries_have_same_coverage() {
        let catalog = Catalog::new().unwrap();

        assert!(
            catalog.missing_keys(Locale::Tr).is_empty(),
            "tr dictionary is missing: {:?}",
            catalog.missing_keys(Locale::Tr)
        );

        let stats = catalog.stats();
        assert!(stats.total_keys > 0);
        for locale in &stats.locales {
            assert_eq!(locale.key_count, stats.total_keys, "locale {}", locale.code);
        }
    }
}
