use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportDefaults,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// Defaults for the `report` command. Explicit CLI flags win over these.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportDefaults {
    /// Lookback window for meter readings, in days.
    pub days_back: u32,
    /// Market cap rate used to derive the implied value (0.06 = 6%).
    pub assumed_cap_rate: f64,
    /// Outstanding loan balance. LTV is only reported when this is positive.
    pub loan_balance: f64,
    pub format: OutputFormat,
}

impl Default for ReportDefaults {
    fn default() -> Self {
        Self {
            days_back: 7,
            assumed_cap_rate: 0.06,
            loan_balance: 0.0,
            format: OutputFormat::Json,
        }
    }
}

/// Connection pool settings. The URL itself comes from `DATABASE_URL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set (e.g. `info,analytics=debug`).
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "proptech.log".to_string(),
        }
    }
}

/// How the report is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Pretty-printed JSON document.
    #[default]
    Json,
    /// Human-readable table of the report sections.
    Table,
}
