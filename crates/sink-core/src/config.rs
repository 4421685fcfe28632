//! Typed sink configuration, built once from the flat startup properties.

use crate::{
    error::ConfigError,
    mapping::{MappingSpec, Selector},
    render::BodyFormat,
};
use connectors::destination::DriverKind;
use model::config::properties::Properties;
use std::str::FromStr;
use tracing::warn;

pub const CONF_DRIVER: &str = "driver";
pub const CONF_CONNECTION_URL: &str = "connectionURL";
pub const CONF_BATCH_SIZE: &str = "batchSize";
pub const CONF_MAPPING: &str = "mapping";
pub const CONF_USER: &str = "user";
pub const CONF_PASSWORD: &str = "password";
pub const CONF_TABLE: &str = "table";
pub const CONF_SQL_DIALECT: &str = "sqlDialect";
pub const CONF_BODY_FORMAT: &str = "bodyFormat";

pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Immutable for the sink's lifetime.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub driver: DriverKind,
    pub connection_url: String,
    pub batch_size: usize,
    pub mapping: MappingSpec,
    pub user: Option<String>,
    pub password: Option<String>,
    pub table: String,
    pub body_format: BodyFormat,
}

impl SinkConfig {
    /// Fails fast on any missing or inconsistent key; a sink built from the
    /// returned config needs no further validation at runtime.
    pub fn from_properties(props: &Properties) -> Result<Self, ConfigError> {
        let driver_raw = require(props, CONF_DRIVER)?;
        let driver = DriverKind::from_str(&driver_raw)
            .map_err(|_| ConfigError::UnknownDriver(driver_raw.clone()))?;

        let dialect_raw = require(props, CONF_SQL_DIALECT)?;
        let dialect = DriverKind::from_str(&dialect_raw)
            .map_err(|_| ConfigError::UnknownDialect(dialect_raw.clone()))?;
        if dialect != driver {
            return Err(ConfigError::DialectMismatch {
                driver: driver_raw,
                dialect: dialect_raw,
            });
        }

        let connection_url = require(props, CONF_CONNECTION_URL)?;
        let table = require(props, CONF_TABLE)?;

        let batch_size = match props.get(CONF_BATCH_SIZE) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidBatchSize(raw.to_string()))?,
            None => DEFAULT_BATCH_SIZE,
        };

        let mapping_raw = require(props, CONF_MAPPING)?;
        let (mapping, diagnostics) = MappingSpec::parse(&mapping_raw);
        for diagnostic in &diagnostics {
            warn!(
                entry = %diagnostic.entry,
                reason = %diagnostic.reason,
                "skipping malformed mapping entry"
            );
        }
        for entry in mapping.entries() {
            if entry.selector == Selector::Unknown {
                warn!(
                    column = %entry.column,
                    "mapping reference has an unknown prefix, column will always be NULL"
                );
            }
        }
        if mapping.is_empty() {
            return Err(ConfigError::EmptyMapping(mapping_raw));
        }

        let body_format = match props.get(CONF_BODY_FORMAT) {
            Some(raw) => BodyFormat::from_str(raw)
                .map_err(|_| ConfigError::UnsupportedBodyFormat(raw.to_string()))?,
            None => BodyFormat::default(),
        };

        Ok(SinkConfig {
            driver,
            connection_url,
            batch_size,
            mapping,
            user: props.get_string(CONF_USER),
            password: props.get_string(CONF_PASSWORD),
            table,
            body_format,
        })
    }
}

fn require(props: &Properties, key: &str) -> Result<String, ConfigError> {
    match props.get_string(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingKey(key.to_string())),
    }
}
