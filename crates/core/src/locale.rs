use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported site locales
///
/// The set is closed: every page exists once per variant, and lookups for an
/// unknown code resolve to [`Locale::DEFAULT`] through
/// [`Locale::from_code_or_default`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    /// Every locale, in routing order
    pub const ALL: [Locale; 2] = [Locale::Ko, Locale::En];

    pub const DEFAULT: Locale = Locale::Ko;

    /// Path segment and `hreflang` code
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }

    /// Open Graph `og:locale` tag
    pub fn og_locale(self) -> &'static str {
        match self {
            Locale::Ko => "ko_KR",
            Locale::En => "en_US",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Resolve a locale code, falling back to the default locale
    pub fn from_code_or_default(code: &str) -> Locale {
        Locale::from_code(code).unwrap_or(Locale::DEFAULT)
    }

    /// Format a calendar date the way the locale writes it in long form
    ///
    /// ```text
    /// ko: 2025년 3월 7일
    /// en: March 7, 2025
    /// ```
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::Ko => format!("{}년 {}월 {}일", date.year(), date.month(), date.day()),
            Locale::En => date.format("%B %-d, %Y").to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_code(s).ok_or_else(|| {
            let supported: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
            Error::InvalidData(format!(
                "Unsupported locale '{}', expected one of: {}",
                s,
                supported.join(", ")
            ))
        })
    }
}
