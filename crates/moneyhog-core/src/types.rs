//! Basic types shared by the engine modules

use chrono::Month;
use moneyhog_config::PolicyConfig;
use serde::{Deserialize, Serialize};

pub use moneyhog_config::{DatePolicy, MonthMatch, Period};

/// Label of the implicit income category
pub const INCOME_LABEL: &str = "Income";

/// Rule deciding when two category names are the same category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    /// Case-sensitive, byte-for-byte
    Exact,
    /// Surrounding whitespace ignored, otherwise exact
    Trimmed,
}

impl Default for CategoryKey {
    fn default() -> Self {
        CategoryKey::Exact
    }
}

impl CategoryKey {
    /// Canonical form of a category name under this rule
    pub fn normalize<'a>(&self, name: &'a str) -> &'a str {
        match self {
            CategoryKey::Exact => name,
            CategoryKey::Trimmed => name.trim(),
        }
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryKey::Exact => write!(f, "exact"),
            CategoryKey::Trimmed => write!(f, "trimmed"),
        }
    }
}

/// Every configurable engine rule in one place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Policy {
    pub dates: DatePolicy,
    pub months: MonthMatch,
    pub categories: CategoryKey,
}

impl From<&PolicyConfig> for Policy {
    fn from(config: &PolicyConfig) -> Self {
        Self {
            dates: config.date_policy,
            months: config.month_match,
            categories: if config.trim_categories {
                CategoryKey::Trimmed
            } else {
                CategoryKey::Exact
            },
        }
    }
}

/// Month number (1-12) for a month name; case-insensitive, three-letter
/// abbreviations accepted
pub fn month_number(name: &str) -> Option<u32> {
    name.trim()
        .parse::<Month>()
        .ok()
        .map(|m| m.number_from_month())
}

/// The "-MM-" month segment searched for in serialized dates
pub fn month_marker(month: u32) -> String {
    format!("-{:02}-", month)
}

/// Canonical English name for a month number
pub fn month_name(number: u32) -> Option<&'static str> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
}

/// Canonical name for a month given in any accepted spelling
pub fn canonical_month(name: &str) -> Option<&'static str> {
    month_number(name).and_then(month_name)
}
