//! [`Config`]-related definitions.

use common::Money;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::rent;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Name of the rental company.
    #[default("Scooter rental".to_owned())]
    pub name: String,

    /// Maximum price charged for a single calendar day of a ride.
    #[default(rent::Calculator::DEFAULT_DAILY_MAX)]
    pub daily_max: Money,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { name, daily_max } = value;
        Self { name, daily_max }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use super::{Config, LogLevel};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("does-not-exist").unwrap();

        assert_eq!(config.service.name, "Scooter rental");
        assert_eq!(config.service.daily_max, "20".parse::<Money>().unwrap());
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn converts_into_service_config() {
        let config = Config::default();

        let service: service::Config = config.service.into();

        assert_eq!(service.name, "Scooter rental");
        assert_eq!(service.daily_max, "20".parse::<Money>().unwrap());
    }
}
