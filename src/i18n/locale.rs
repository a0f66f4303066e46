//! Locale definitions and regional conventions
//!
//! Each supported locale carries its display conventions: separators,
//! currency symbol placement, date pattern, and text direction. Adding a
//! locale means adding a variant here plus its translation file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::RankBuddyError;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Tr,
}

/// Currency symbol position relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPosition {
    Before,
    After,
}

/// Text direction hint for layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    /// All locales the crate ships translations for
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Tr];

    /// Short locale code used in storage and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }

    /// Locale name in its own language, for locale switchers
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Tr => "Türkçe",
        }
    }

    /// Separator between integer and fractional digits
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::En => '.',
            Locale::Tr => ',',
        }
    }

    /// Separator between digit groups
    pub fn thousands_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::Tr => '.',
        }
    }

    /// Where the currency symbol sits relative to the amount
    pub fn currency_position(&self) -> CurrencyPosition {
        match self {
            Locale::En => CurrencyPosition::Before,
            Locale::Tr => CurrencyPosition::After,
        }
    }

    /// chrono format pattern for dashboard dates
    pub fn date_format(&self) -> &'static str {
        match self {
            Locale::En => "%b %-d, %Y",
            Locale::Tr => "%d.%m.%Y",
        }
    }

    /// Layout direction. Both shipped locales are left-to-right; the hint
    /// exists so right-to-left locales can be added without API changes.
    pub fn text_direction(&self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::Tr => TextDirection::Ltr,
        }
    }

    /// Label shown in place of an amount for contact-us pricing
    pub fn custom_amount_label(&self) -> &'static str {
        match self {
            Locale::En => "Custom",
            Locale::Tr => "Özel",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = RankBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "tr" => Ok(Locale::Tr),
            other => Err(RankBuddyError::UnsupportedLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(locale.as_str().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!("de".parse::<Locale>().is_err());
        assert!("EN".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_separator_conventions() {
        assert_eq!(Locale::En.decimal_separator(), '.');
        assert_eq!(Locale::En.thousands_separator(), ',');
        assert_eq!(Locale::Tr.decimal_separator(), ',');
        assert_eq!(Locale::Tr.thousands_separator(), '.');
    }

    #[test]
    fn test_currency_positions() {
        assert_eq!(Locale::En.currency_position(), CurrencyPosition::Before);
        assert_eq!(Locale::Tr.currency_position(), CurrencyPosition::After);
    }

    #[test]
    fn test_serde_uses_short_codes() {
        assert_eq!(serde_json::to_string(&Locale::Tr).unwrap(), "\"tr\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
