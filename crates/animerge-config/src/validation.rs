// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::AnimergeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AnimergeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.engine.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.log_level `{}` is not one of {}",
                config.engine.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.dispatch.addon_timeout_ms == Some(0) {
        errors.push(ConfigError::Validation {
            message: "dispatch.addon_timeout_ms must be greater than 0 when set".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for (i, source) in config.addons.sources.iter().enumerate() {
        if source.as_os_str().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("addons.sources[{i}] must not be empty"),
            });
        } else if !seen.insert(source) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "addon source `{}` is listed more than once in addons.sources",
                    source.display()
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&AnimergeConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = AnimergeConfig::default();
        config.engine.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "engine.log_level"));
    }

    #[test]
    fn zero_timeout_fails() {
        let mut config = AnimergeConfig::default();
        config.dispatch.addon_timeout_ms = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "addon_timeout_ms"));
    }

    #[test]
    fn duplicate_and_empty_sources_fail_together() {
        let mut config = AnimergeConfig::default();
        config.addons.sources = vec![
            PathBuf::from("a.toml"),
            PathBuf::new(),
            PathBuf::from("a.toml"),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_message(&errors, "sources[1]"));
        assert!(has_message(&errors, "more than once"));
    }
}
