// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./animerge.toml` > `~/.config/animerge/animerge.toml`
//! > `/etc/animerge/animerge.toml` with environment variable overrides via the
//! `ANIMERGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AnimergeConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/animerge/animerge.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "animerge.toml";

/// `~/.config/animerge/animerge.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("animerge").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/animerge/animerge.toml` (system-wide)
/// 3. `~/.config/animerge/animerge.toml` (user XDG config)
/// 4. `./animerge.toml` (local directory)
/// 5. `ANIMERGE_*` environment variables
pub fn load_config() -> Result<AnimergeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AnimergeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnimergeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AnimergeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AnimergeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AnimergeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ANIMERGE_DISPATCH_ADDON_TIMEOUT_MS` must map to
/// `dispatch.addon_timeout_ms`, not `dispatch.addon.timeout.ms`.
fn env_provider() -> Env {
    Env::prefixed("ANIMERGE_").map(|key| {
        key.as_str()
            .replacen("engine_", "engine.", 1)
            .replacen("dispatch_", "dispatch.", 1)
            .replacen("addons_", "addons.", 1)
            .into()
    })
}
