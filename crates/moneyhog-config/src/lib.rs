//! Configuration management for moneyhog
//!
//! This module handles loading, validation, and management of
//! moneyhog configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow cross-origin requests from the presentation layer
    #[serde(default = "default_true")]
    pub cors_enable: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enable: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the record documents
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Create the data directory on startup when missing
    #[serde(default = "default_true")]
    pub create_missing: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            create_missing: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

/// User identification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersConfig {
    /// Owner email used when a request carries no user header
    #[serde(default = "default_email")]
    pub default_email: String,
    /// Request header carrying the owner email
    #[serde(default = "default_user_header")]
    pub header: String,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            default_email: default_email(),
            header: default_user_header(),
        }
    }
}

fn default_email() -> String {
    "unknown".to_string()
}

fn default_user_header() -> String {
    "x-user-email".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

/// How the range filter treats dates that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Unparseable dates are kept
    Lenient,
    /// Unparseable dates are dropped
    Strict,
}

impl Default for DatePolicy {
    fn default() -> Self {
        DatePolicy::Lenient
    }
}

impl std::str::FromStr for DatePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(DatePolicy::Lenient),
            "strict" => Ok(DatePolicy::Strict),
            _ => Err(format!("Invalid date policy: {}", s)),
        }
    }
}

impl std::fmt::Display for DatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatePolicy::Lenient => write!(f, "lenient"),
            DatePolicy::Strict => write!(f, "strict"),
        }
    }
}

/// How a record date is matched against a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthMatch {
    /// The serialized date contains the "-MM-" month segment
    Substring,
    /// The parsed month field equals the target month
    Structured,
}

impl Default for MonthMatch {
    fn default() -> Self {
        MonthMatch::Substring
    }
}

impl std::str::FromStr for MonthMatch {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "substring" => Ok(MonthMatch::Substring),
            "structured" => Ok(MonthMatch::Structured),
            _ => Err(format!("Invalid month match: {}", s)),
        }
    }
}

impl std::fmt::Display for MonthMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthMatch::Substring => write!(f, "substring"),
            MonthMatch::Structured => write!(f, "structured"),
        }
    }
}

/// Filtering and category identity rules
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
    /// Treatment of malformed dates in range filtering
    #[serde(default)]
    pub date_policy: DatePolicy,
    /// Month matching rule for monthly totals
    #[serde(default)]
    pub month_match: MonthMatch,
    /// Trim surrounding whitespace from category names before comparing
    #[serde(default = "default_false")]
    pub trim_categories: bool,
}

/// Trailing window used by the spending chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Last 7 days
    Last7Days,
    /// Last 30 days
    Last30Days,
    /// Last 90 days
    Last90Days,
    /// All time
    All,
}

impl Default for Period {
    fn default() -> Self {
        Period::Last7Days
    }
}

impl Period {
    /// Number of trailing days, or `None` for all time
    pub fn days(&self) -> Option<i64> {
        match self {
            Period::Last7Days => Some(7),
            Period::Last30Days => Some(30),
            Period::Last90Days => Some(90),
            Period::All => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Last7Days => "Last 7 Days",
            Period::Last30Days => "Last 30 Days",
            Period::Last90Days => "Last 90 Days",
            Period::All => "All Time",
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(&[' ', '_', '-'][..], "").as_str() {
            "last7days" | "7" => Ok(Period::Last7Days),
            "last30days" | "30" => Ok(Period::Last30Days),
            "last90days" | "90" => Ok(Period::Last90Days),
            "all" | "alltime" => Ok(Period::All),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Last7Days => write!(f, "last7days"),
            Period::Last30Days => write!(f, "last30days"),
            Period::Last90Days => write!(f, "last90days"),
            Period::All => write!(f, "all"),
        }
    }
}

/// Chart and visualization settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Default trailing window for the spending chart
    #[serde(default)]
    pub default_period: Period,
    /// Draw average goal lines on the monthly chart
    #[serde(default = "default_true")]
    pub show_goal_lines: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_period: Period::Last7Days,
            show_goal_lines: true,
        }
    }
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol prefixed to amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: 2,
            thousands_separator: ",".to_string(),
        }
    }
}

fn default_symbol() -> String {
    "R".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Data directory settings
    #[serde(default)]
    pub data: DataConfig,
    /// User identification
    #[serde(default)]
    pub users: UsersConfig,
    /// Filtering policies
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.users.header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "users.header".to_string(),
                reason: "User header name must not be empty".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
