//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that URLs parse and the project root is absolute
//! - Validate value ranges (channel capacity > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::BridgeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must end with '/': {value}")]
    MissingTrailingSlash { field: &'static str, value: String },

    #[error("server.project_root must be an absolute path: {0}")]
    RelativeProjectRoot(String),

    #[error("server.instance_id must not be empty")]
    EmptyInstanceId,

    #[error("channel.capacity must be greater than zero")]
    ZeroCapacity,

    #[error("unknown observability.log_level: {0}")]
    UnknownLogLevel(String),
}

/// Validate a parsed configuration, collecting every problem.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "server.server_url", &config.server.server_url);
    check_url(
        &mut errors,
        "markdown.resource_base_url",
        &config.markdown.resource_base_url,
    );

    if !config.server.project_root.starts_with('/') {
        errors.push(ValidationError::RelativeProjectRoot(
            config.server.project_root.clone(),
        ));
    }

    if let Some(id) = &config.server.instance_id {
        if id.trim().is_empty() {
            errors.push(ValidationError::EmptyInstanceId);
        }
    }

    if config.channel.capacity == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    } else if !value.ends_with('/') {
        // Resource paths and the instance segment are appended verbatim.
        errors.push(ValidationError::MissingTrailingSlash {
            field,
            value: value.to_string(),
        });
    }
}
