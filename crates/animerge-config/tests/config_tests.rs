// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the animerge configuration system.

use std::path::PathBuf;
use std::time::Duration;

use animerge_config::diagnostic::ConfigError;
use animerge_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[engine]
log_level = "debug"

[dispatch]
addon_timeout_ms = 2500

[addons]
sources = ["addons/local.toml", "/srv/animerge/jikan.toml"]
strict = true
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.engine.log_level, "debug");
    assert_eq!(
        config.dispatch.addon_timeout(),
        Some(Duration::from_millis(2500))
    );
    assert_eq!(
        config.addons.sources,
        vec![
            PathBuf::from("addons/local.toml"),
            PathBuf::from("/srv/animerge/jikan.toml")
        ]
    );
    assert!(config.addons.strict);
}

/// Empty TOML falls back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.engine.log_level, "info");
    assert_eq!(config.dispatch.addon_timeout_ms, None);
    assert!(config.addons.sources.is_empty());
}

/// An unknown key gets a typo suggestion.
#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[dispatch]
addon_timout_ms = 100
"#;

    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "addon_timout_ms");
            assert_eq!(suggestion.as_deref(), Some("addon_timeout_ms"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// An unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "telemetry")));
}

/// A wrongly typed value produces an InvalidType diagnostic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[addons]
strict = "yes"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

/// Semantic validation runs after a successful parse.
#[test]
fn zero_timeout_fails_validation() {
    let toml = r#"
[dispatch]
addon_timeout_ms = 0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| e.to_string().contains("addon_timeout_ms")));
}

/// Environment variables override file values.
#[test]
fn env_overrides_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[engine]
log_level = "warn"

[dispatch]
addon_timeout_ms = 100
"#,
        )?;
        jail.set_env("ANIMERGE_DISPATCH_ADDON_TIMEOUT_MS", "750");
        jail.set_env("ANIMERGE_ADDONS_STRICT", "true");

        let config = load_config_from_path(std::path::Path::new("custom.toml"))?;
        assert_eq!(config.engine.log_level, "warn");
        assert_eq!(config.dispatch.addon_timeout_ms, Some(750));
        assert!(config.addons.strict);
        Ok(())
    });
}

/// A missing config file is not an error: defaults apply.
#[test]
fn missing_file_uses_defaults() {
    figment::Jail::expect_with(|_jail| {
        let config = load_and_validate_path(std::path::Path::new("does-not-exist.toml"))
            .map_err(|errors| format!("{errors:?}"))?;
        assert_eq!(config.engine.log_level, "info");
        Ok(())
    });
}
