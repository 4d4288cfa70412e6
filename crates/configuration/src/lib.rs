use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DatabaseSettings, LoggingSettings, OutputFormat, ReportDefaults};

/// Prefix for environment overrides, e.g. `PROPTECH_REPORT__DAYS_BACK=14`.
pub const ENV_PREFIX: &str = "PROPTECH";

/// Loads the application configuration from `config.toml` and the environment.
///
/// The file is optional. Environment variables prefixed with `PROPTECH_`
/// override file values, using `__` to separate nested keys.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Same as [`load_config`] but reads the TOML file at `path`.
pub fn load_config_from(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
    build(builder)
}

fn build(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be greater than 0".to_string(),
        ));
    }
    if !config.report.assumed_cap_rate.is_finite() {
        return Err(ConfigError::ValidationError(
            "report.assumed_cap_rate must be a finite number".to_string(),
        ));
    }
    if !config.report.loan_balance.is_finite() || config.report.loan_balance < 0.0 {
        return Err(ConfigError::ValidationError(
            "report.loan_balance must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        build(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.report.days_back, 7);
        assert_eq!(config.report.assumed_cap_rate, 0.06);
        assert_eq!(config.report.loan_balance, 0.0);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = from_toml(
            r#"
            [report]
            days_back = 30
            format = "table"

            [logging]
            directory = "/var/log/proptech"
            "#,
        )
        .unwrap();
        assert_eq!(config.report.days_back, 30);
        assert_eq!(config.report.assumed_cap_rate, 0.06);
        assert_eq!(config.report.format, OutputFormat::Table);
        assert_eq!(
            config.logging.directory.as_deref(),
            Some(std::path::Path::new("/var/log/proptech"))
        );
        assert_eq!(config.logging.file_prefix, "proptech.log");
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = from_toml("[database]\nmax_connections = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_loan_balance_is_rejected() {
        let err = from_toml("[report]\nloan_balance = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
