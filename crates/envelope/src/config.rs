use crate::error::ResponseCode;
use jsonschema::{Draft, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const CONFIG_SCHEMA: &str = include_str!("../../../contracts/config/envelope-config.v1.json");

pub const SUCCESS_CODE_VAR: &str = "ENVELOPE_SUCCESS_CODE";
pub const SUCCESS_MESSAGE_VAR: &str = "ENVELOPE_SUCCESS_MESSAGE";
pub const FAULT_CODE_VAR: &str = "ENVELOPE_FAULT_CODE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Schema compilation failed: {message}")]
    SchemaCompilationFailed { message: String },

    #[error("Config validation failed")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("JSON parsing failed: {message}")]
    JsonParsingFailed { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub json_pointer: String,
    pub message: String,
    pub schema_path: String,
}

/// Defaults applied by the adapter.
///
/// `success_code` and `fault_code` are conventions. They are not checked
/// against the codes carried by recognized errors, so an application that
/// raises `RecognizedError::new(9999, ..)` produces envelopes that look like
/// unclassified faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvelopeConfig {
    pub success_code: i32,
    pub success_message: String,
    pub fault_code: i32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            success_code: ResponseCode::Success.code(),
            success_message: ResponseCode::Success.message().to_string(),
            fault_code: ResponseCode::Error.code(),
        }
    }
}

impl EnvelopeConfig {
    /// Defaults overridden by `ENVELOPE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(SUCCESS_CODE_VAR) {
            config.success_code = parse_code(SUCCESS_CODE_VAR, &raw)?;
        }
        if let Some(message) = lookup(SUCCESS_MESSAGE_VAR) {
            config.success_message = message;
        }
        if let Some(raw) = lookup(FAULT_CODE_VAR) {
            config.fault_code = parse_code(FAULT_CODE_VAR, &raw)?;
        }

        config.warn_on_collision();
        Ok(config)
    }

    /// Loads a JSON config file. A missing file yields the defaults.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::JsonParsingFailed {
                message: e.to_string(),
            })?;

        Self::from_value(&value)
    }

    #[instrument(skip(value))]
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        validate_config(value)?;

        let config: Self =
            serde_json::from_value(value.clone()).map_err(|e| ConfigError::JsonParsingFailed {
                message: e.to_string(),
            })?;

        debug!(
            success_code = config.success_code,
            fault_code = config.fault_code,
            "Loaded envelope config"
        );
        config.warn_on_collision();
        Ok(config)
    }

    fn warn_on_collision(&self) {
        if self.success_code == self.fault_code {
            warn!(
                code = self.success_code,
                "Success code and fault code are identical; envelopes can only be told apart by `ok`"
            );
        }
    }
}

fn parse_code(name: &str, raw: &str) -> Result<i32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn validate_config(config: &Value) -> Result<(), ConfigError> {
    let schema_value: Value =
        serde_json::from_str(CONFIG_SCHEMA).map_err(|e| ConfigError::JsonParsingFailed {
            message: e.to_string(),
        })?;

    let schema = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema_value)
        .map_err(|e| ConfigError::SchemaCompilationFailed {
            message: e.to_string(),
        })?;

    if let Err(errors) = schema.validate(config) {
        let validation_errors: Vec<ValidationError> = errors
            .map(|error| ValidationError {
                json_pointer: error.instance_path.to_string(),
                message: error.to_string(),
                schema_path: error.schema_path.to_string(),
            })
            .collect();

        return Err(ConfigError::ValidationFailed {
            errors: validation_errors,
        });
    }

    Ok(())
}
