// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the animerge addon engine.

use thiserror::Error;

use crate::types::Operation;

/// The primary error type used across addon traits, the loader, and the engine.
#[derive(Debug, Error)]
pub enum AnimergeError {
    /// Addon source text could not be parsed.
    #[error("invalid addon source: {0}")]
    InvalidSource(String),

    /// Addon source has no `[manifest]` section.
    #[error("addon source is missing a manifest")]
    MissingManifest,

    /// Manifest carries no loader-compatibility version.
    #[error("addon '{name}' is missing loader_ver")]
    MissingLoaderVersion { name: String },

    /// Manifest targets a loader version the engine does not support.
    #[error("addon '{name}' loader_ver mismatch (expected {expected}, got {found})")]
    IncompatibleLoaderVersion {
        name: String,
        expected: String,
        found: String,
    },

    /// Manifest fields are present but malformed (empty name, bad semver).
    #[error("invalid addon manifest: {0}")]
    InvalidManifest(String),

    /// Addon source names an implementation kind no factory is registered for.
    #[error("unknown addon kind '{kind}'")]
    UnknownAddonKind { kind: String },

    /// An addon's data or streaming provider failed.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An addon was asked for an operation it does not implement.
    #[error("operation {operation} is not supported")]
    Unsupported { operation: Operation },

    /// An addon call panicked.
    #[error("addon panicked: {message}")]
    Panicked { message: String },

    /// An addon call did not settle within the configured limit.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Caller violated the query contract (e.g. by-id lookup without any id).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnimergeError {
    /// Shorthand for a provider failure without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for errors raised while loading or validating an addon.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSource(_)
                | Self::MissingManifest
                | Self::MissingLoaderVersion { .. }
                | Self::IncompatibleLoaderVersion { .. }
                | Self::InvalidManifest(_)
                | Self::UnknownAddonKind { .. }
        )
    }
}
