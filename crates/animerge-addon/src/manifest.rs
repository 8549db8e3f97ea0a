// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addon manifests and addon source parsing.
//!
//! An addon source is a TOML document with a `[manifest]` section describing
//! the addon, an `[addon]` section naming the compiled-in implementation kind,
//! and an optional `[config]` table handed to that implementation.

use animerge_core::AnimergeError;
use serde::{Deserialize, Serialize};

/// The single loader-compatibility version this engine accepts.
pub const LOADER_VERSION: &str = "1";

/// Descriptor every addon carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonManifest {
    /// Name used as the removal key. Not required to be unique.
    pub name: String,
    /// Semantic version of the addon itself.
    pub version: String,
    /// Loader-compatibility version; empty means absent.
    #[serde(default)]
    pub loader_ver: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional author identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl AddonManifest {
    /// Create a manifest with no description or author.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        loader_ver: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            loader_ver: loader_ver.into(),
            description: None,
            author: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// A parsed addon source, ready to be handed to a factory.
#[derive(Debug, Clone)]
pub struct AddonSource {
    pub manifest: AddonManifest,
    /// Implementation kind from the `[addon]` section.
    pub kind: String,
    /// Implementation-specific configuration.
    pub config: toml::Table,
}

/// Intermediate TOML deserialization struct for addon sources.
#[derive(Debug, Deserialize)]
struct AddonSourceFile {
    manifest: Option<ManifestSection>,
    addon: Option<AddonSection>,
    #[serde(default)]
    config: toml::Table,
}

/// The `[manifest]` section.
#[derive(Debug, Deserialize)]
struct ManifestSection {
    name: String,
    version: String,
    loader_ver: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

/// The `[addon]` section.
#[derive(Debug, Deserialize)]
struct AddonSection {
    kind: String,
}

/// Parse addon source text.
///
/// Only structural problems are reported here; version gating happens in
/// [`validate_manifest`].
pub fn parse_addon_source(source: &str) -> Result<AddonSource, AnimergeError> {
    let file: AddonSourceFile =
        toml::from_str(source).map_err(|e| AnimergeError::InvalidSource(e.to_string()))?;

    let manifest = file.manifest.ok_or(AnimergeError::MissingManifest)?;
    let addon = file.addon.ok_or_else(|| {
        AnimergeError::InvalidSource(format!(
            "addon '{}' has no [addon] section naming its kind",
            manifest.name
        ))
    })?;

    if addon.kind.trim().is_empty() {
        return Err(AnimergeError::InvalidSource(format!(
            "addon '{}': kind must not be empty",
            manifest.name
        )));
    }

    Ok(AddonSource {
        manifest: AddonManifest {
            name: manifest.name,
            version: manifest.version,
            loader_ver: manifest.loader_ver.unwrap_or_default(),
            description: manifest.description,
            author: manifest.author,
        },
        kind: addon.kind,
        config: file.config,
    })
}

/// Check a manifest against the loader version the engine supports.
///
/// The loader version must be present and exactly equal to `supported`;
/// there is no range or negotiation. The addon's own name and version are
/// checked afterwards.
pub fn validate_manifest(manifest: &AddonManifest, supported: &str) -> Result<(), AnimergeError> {
    if manifest.loader_ver.is_empty() {
        return Err(AnimergeError::MissingLoaderVersion {
            name: manifest.name.clone(),
        });
    }

    if manifest.loader_ver != supported {
        return Err(AnimergeError::IncompatibleLoaderVersion {
            name: manifest.name.clone(),
            expected: supported.to_string(),
            found: manifest.loader_ver.clone(),
        });
    }

    if manifest.name.trim().is_empty() {
        return Err(AnimergeError::InvalidManifest(
            "name must not be empty".to_string(),
        ));
    }

    semver::Version::parse(&manifest.version).map_err(|e| {
        AnimergeError::InvalidManifest(format!(
            "addon '{}': version '{}' is not semver: {e}",
            manifest.name, manifest.version
        ))
    })?;

    Ok(())
}
