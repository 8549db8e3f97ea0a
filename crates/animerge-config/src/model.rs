// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the animerge host.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level animerge configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnimergeConfig {
    /// Host process settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Fan-out settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Addon sources to load at startup.
    #[serde(default)]
    pub addons: AddonsConfig,
}

/// Host process configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Upper bound on a single addon call, in milliseconds.
    /// When unset, every addon is awaited until it settles.
    #[serde(default)]
    pub addon_timeout_ms: Option<u64>,
}

impl DispatchConfig {
    pub fn addon_timeout(&self) -> Option<Duration> {
        self.addon_timeout_ms.map(Duration::from_millis)
    }
}

/// Addon loading configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AddonsConfig {
    /// Paths of addon source files, loaded in order.
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Exit at startup if any listed source is rejected.
    #[serde(default)]
    pub strict: bool,
}
