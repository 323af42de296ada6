//! Configuration validation

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository(config)?;
    validate_git(config)?;
    validate_changelog(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_repository(config: &Config) -> Result<()> {
    if config.repository.remote.trim().is_empty() {
        return Err(invalid("repository.remote", "remote cannot be empty"));
    }

    if let Some(url) = &config.repository.url {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(invalid(
                    "repository.url",
                    format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
                ));
            }
            Err(e) => return Err(invalid("repository.url", e.to_string())),
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if let Some(pattern) = &config.git.tag_pattern {
        if let Err(e) = Regex::new(pattern) {
            return Err(invalid("git.tag_pattern", e.to_string()));
        }
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file path cannot be empty"));
    }

    if config
        .changelog
        .exclude_types
        .iter()
        .any(|t| t.trim().is_empty())
    {
        return Err(invalid("changelog.exclude_types", "types cannot be empty strings"));
    }

    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> crate::error::HeraldError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
    .into()
}
