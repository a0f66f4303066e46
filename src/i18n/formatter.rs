//! Locale-aware value formatting
//!
//! Renders currency amounts, counts, decimals, and dates according to the
//! active locale's conventions. Amounts are authored in the base currency
//! (USD) and converted with static display rates; formatting here is for
//! presentation only and never feeds back into stored values.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::i18n::locale::{CurrencyPosition, Locale};

/// Currencies the dashboard can display prices in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Try,
}

impl CurrencyCode {
    /// Parse an ISO-4217 style code, tolerating case
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(CurrencyCode::Usd),
            "EUR" => Some(CurrencyCode::Eur),
            "GBP" => Some(CurrencyCode::Gbp),
            "TRY" => Some(CurrencyCode::Try),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "€",
            CurrencyCode::Gbp => "£",
            CurrencyCode::Try => "₺",
        }
    }

    /// Display conversion rate from one base-currency unit
    pub fn rate_from_base(&self) -> f64 {
        match self {
            CurrencyCode::Usd => 1.0,
            CurrencyCode::Eur => 0.9,
            CurrencyCode::Gbp => 0.8,
            CurrencyCode::Try => 40.0,
        }
    }
}

/// Formats values according to one locale's conventions
#[derive(Debug, Clone, Copy)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Format a price given in base-currency units.
    ///
    /// `None` stands for contact-us pricing and renders as the locale's
    /// custom-amount label. Whole amounts render without fraction digits,
    /// fractional amounts always with two. An unrecognized currency code
    /// renders the unconverted amount with the raw code appended.
    pub fn format_currency(&self, amount: Option<f64>, currency_code: &str) -> String {
        let amount = match amount {
            Some(amount) => amount,
            None => return self.locale.custom_amount_label().to_string(),
        };

        match CurrencyCode::from_code(currency_code) {
            Some(currency) => {
                let converted = amount * currency.rate_from_base();
                let number = self.format_decimal(converted, fraction_digits(converted));
                match self.locale.currency_position() {
                    CurrencyPosition::Before => format!("{}{}", currency.symbol(), number),
                    CurrencyPosition::After => format!("{} {}", number, currency.symbol()),
                }
            }
            None => {
                warn!(code = currency_code, "Unknown currency code, rendering without conversion");
                let number = self.format_decimal(amount, fraction_digits(amount));
                format!("{} {}", number, currency_code)
            }
        }
    }

    /// Format an integer with thousands separators
    pub fn format_number(&self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let grouped = group_digits(&digits, self.locale.thousands_separator());

        if n < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format a decimal with a fixed number of fraction digits
    pub fn format_decimal(&self, n: f64, decimals: usize) -> String {
        let formatted = format!("{:.prec$}", n.abs(), prec = decimals);
        let mut parts = formatted.split('.');

        let integer_part = match parts.next() {
            Some(digits) => group_digits(digits, self.locale.thousands_separator()),
            None => formatted.clone(),
        };

        let result = match parts.next() {
            Some(fraction) if decimals > 0 => {
                format!("{}{}{}", integer_part, self.locale.decimal_separator(), fraction)
            }
            _ => integer_part,
        };

        if n < 0.0 {
            format!("-{}", result)
        } else {
            result
        }
    }

    /// Format a timestamp using the locale's date pattern
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        date.format(self.locale.date_format()).to_string()
    }
}

/// Whole amounts carry no fraction digits, everything else two
fn fraction_digits(amount: f64) -> usize {
    if amount.fract() == 0.0 {
        0
    } else {
        2
    }
}

/// Insert a separator every three digits, right to left
fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result
}
