// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addon loader and validator.
//!
//! Addon implementations are compiled into the host and registered on the
//! loader as [`AddonFactory`] values keyed by kind. Loading a source parses
//! its manifest, gates it on the loader version, and asks the matching
//! factory to build the providers from the source's `[config]` table.
//!
//! Factories run in the host process without any sandboxing. Hosts are
//! responsible for trusting the factories they register and the sources
//! they feed to the loader.

use std::collections::HashMap;

use animerge_core::AnimergeError;
use tracing::{info, warn};

use crate::addon::Addon;
use crate::builtin::StaticCatalogFactory;
use crate::manifest::{parse_addon_source, validate_manifest, AddonManifest, LOADER_VERSION};

/// Builds an addon of one implementation kind.
pub trait AddonFactory: Send + Sync {
    /// Kind string matched against the source's `[addon] kind`.
    fn kind(&self) -> &str;

    /// Build the addon for an already-validated manifest.
    fn create(
        &self,
        manifest: AddonManifest,
        config: &toml::Table,
    ) -> Result<Addon, AnimergeError>;
}

/// Parses, validates, and instantiates addons from source text.
pub struct AddonLoader {
    supported_version: String,
    factories: HashMap<String, Box<dyn AddonFactory>>,
}

impl AddonLoader {
    /// A loader for [`LOADER_VERSION`] with no factories registered.
    pub fn new() -> Self {
        Self {
            supported_version: LOADER_VERSION.to_string(),
            factories: HashMap::new(),
        }
    }

    /// A loader with every built-in addon kind registered.
    pub fn with_builtins() -> Self {
        let mut loader = Self::new();
        loader.register_factory(Box::new(StaticCatalogFactory));
        loader
    }

    /// Override the supported loader version.
    pub fn with_supported_version(mut self, version: impl Into<String>) -> Self {
        self.supported_version = version.into();
        self
    }

    pub fn supported_version(&self) -> &str {
        &self.supported_version
    }

    /// Register a factory, replacing any previous factory of the same kind.
    pub fn register_factory(&mut self, factory: Box<dyn AddonFactory>) {
        self.factories.insert(factory.kind().to_string(), factory);
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Validate a manifest against this loader's supported version.
    pub fn validate(&self, manifest: &AddonManifest) -> Result<(), AnimergeError> {
        validate_manifest(manifest, &self.supported_version)
    }

    /// Load an addon from source text.
    ///
    /// Every rejection is logged and returned; nothing here mutates any
    /// registry.
    pub fn load(&self, source: &str) -> Result<Addon, AnimergeError> {
        match self.try_load(source) {
            Ok(addon) => {
                info!(
                    addon = %addon.name(),
                    version = %addon.manifest().version,
                    operations = addon.operations().count(),
                    "addon loaded"
                );
                Ok(addon)
            }
            Err(e) => {
                warn!(error = %e, "rejected addon source");
                Err(e)
            }
        }
    }

    fn try_load(&self, source: &str) -> Result<Addon, AnimergeError> {
        let parsed = parse_addon_source(source)?;
        self.validate(&parsed.manifest)?;

        let factory =
            self.factories
                .get(&parsed.kind)
                .ok_or_else(|| AnimergeError::UnknownAddonKind {
                    kind: parsed.kind.clone(),
                })?;

        factory.create(parsed.manifest, &parsed.config)
    }
}

impl Default for AddonLoader {
    fn default() -> Self {
        Self::with_builtins()
    }
}
