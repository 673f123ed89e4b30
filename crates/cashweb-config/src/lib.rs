//! Configuration management for cashweb
//!
//! This module handles loading, validation, and management of
//! cashweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

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
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Remote ledger service (spreadsheet web app) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Web app URL every action is sent to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seconds to wait for a response before giving up
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://script.google.com/macros/s/REPLACE_WITH_DEPLOYMENT_ID/exec".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Balance bucket a payment channel settles into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceBucket {
    /// Physical cash box
    Cash,
    /// Bank account (transfers, checks, card payments)
    Bank,
    /// First mobile money wallet (Orange Money)
    MobileA,
    /// Second mobile money wallet (MTN Mobile Money)
    MobileB,
}

impl std::str::FromStr for BalanceBucket {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(BalanceBucket::Cash),
            "bank" => Ok(BalanceBucket::Bank),
            "mobile_a" => Ok(BalanceBucket::MobileA),
            "mobile_b" => Ok(BalanceBucket::MobileB),
            _ => Err(format!("Invalid balance bucket: {}", s)),
        }
    }
}

impl std::fmt::Display for BalanceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceBucket::Cash => write!(f, "cash"),
            BalanceBucket::Bank => write!(f, "bank"),
            BalanceBucket::MobileA => write!(f, "mobile_a"),
            BalanceBucket::MobileB => write!(f, "mobile_b"),
        }
    }
}

/// Channel label to bucket tables, one per transaction kind.
///
/// Keys are the channel labels exactly as the spreadsheet stores them.
/// A channel missing from a table does not move any balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancesConfig {
    /// Buckets credited by receipts
    #[serde(default = "default_receipt_buckets")]
    pub receipts: BTreeMap<String, BalanceBucket>,
    /// Buckets debited by expenses
    #[serde(default = "default_expense_buckets")]
    pub expenses: BTreeMap<String, BalanceBucket>,
}

impl Default for BalancesConfig {
    fn default() -> Self {
        Self {
            receipts: default_receipt_buckets(),
            expenses: default_expense_buckets(),
        }
    }
}

fn default_receipt_buckets() -> BTreeMap<String, BalanceBucket> {
    BTreeMap::from([
        ("Espèces".to_string(), BalanceBucket::Cash),
        ("Virement bancaire".to_string(), BalanceBucket::Bank),
        ("Chèque".to_string(), BalanceBucket::Bank),
        ("Orange Money".to_string(), BalanceBucket::MobileA),
        ("MTN Mobile Money".to_string(), BalanceBucket::MobileB),
    ])
}

fn default_expense_buckets() -> BTreeMap<String, BalanceBucket> {
    let mut buckets = default_receipt_buckets();
    buckets.insert("Carte bancaire".to_string(), BalanceBucket::Bank);
    buckets
}

/// How timestamp cells from the spreadsheet become calendar days
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatesConfig {
    /// `local` (server time zone), `source` (the offset written in the
    /// timestamp) or a fixed offset such as `+01:00`
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "local".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error (env_logger filter syntax)
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

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol shown next to amounts
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_symbol() -> String {
    "CFA".to_string()
}

fn default_decimal_places() -> u32 {
    0
}

// fr-FR groups digits with a narrow no-break space
fn default_thousands_sep() -> String {
    "\u{202f}".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote ledger service settings
    #[serde(default)]
    pub remote: RemoteConfig,
    /// Channel to balance bucket tables
    #[serde(default)]
    pub balances: BalancesConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Date settings
    #[serde(default)]
    pub dates: DatesConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

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

        let base_url = self.remote.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "remote.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.timeout_secs".to_string(),
                reason: "Timeout must be at least one second".to_string(),
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

    /// Request deadline for the remote service
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.remote.timeout_secs, 15);
        assert_eq!(config.remote_timeout(), Duration::from_secs(15));
        assert_eq!(config.currency.symbol, "CFA");
        assert_eq!(config.currency.decimal_places, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_bucket_tables() {
        let balances = BalancesConfig::default();
        assert_eq!(balances.receipts.get("Chèque"), Some(&BalanceBucket::Bank));
        assert_eq!(balances.receipts.get("Carte bancaire"), None);
        assert_eq!(balances.expenses.get("Carte bancaire"), Some(&BalanceBucket::Bank));
        assert_eq!(balances.expenses.get("Chèque"), Some(&BalanceBucket::Bank));
        assert_eq!(balances.expenses.get("MTN Mobile Money"), Some(&BalanceBucket::MobileB));
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.remote.timeout_secs, 15);
        assert_eq!(config.balances.expenses.len(), 6);
        assert_eq!(config.balances.receipts.len(), 5);
        assert_eq!(config.dates.timezone, "local");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
remote:
  base_url: "https://example.org/exec"
balances:
  expenses:
    "Espèces": cash
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.remote.base_url, "https://example.org/exec");
        assert_eq!(config.remote.timeout_secs, 15);
        assert_eq!(config.balances.expenses.len(), 1);
        assert_eq!(config.balances.receipts.len(), 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.dates.timezone, "local");
    }

    #[test]
    fn test_unknown_bucket_is_invalid_yaml() {
        let yaml = r#"
balances:
  receipts:
    "Espèces": wallet
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "server.port"
        ));

        let mut config = Config::default();
        config.remote.base_url = "script.google.com/exec".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.remote.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.currency.decimal_places = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("cashweb-missing-config-test.yaml");
        let err = Config::load(path).unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cashweb-config-test-{}.yaml", std::process::id()));
        std::fs::write(&path, "server:\n  port: 9000\n").unwrap();
        let config = Config::load(path.clone()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bucket_from_str_and_display() {
        assert_eq!("mobile_a".parse::<BalanceBucket>().unwrap(), BalanceBucket::MobileA);
        assert_eq!("BANK".parse::<BalanceBucket>().unwrap(), BalanceBucket::Bank);
        assert!("wallet".parse::<BalanceBucket>().is_err());
        assert_eq!(BalanceBucket::MobileB.to_string(), "mobile_b");
    }
}
