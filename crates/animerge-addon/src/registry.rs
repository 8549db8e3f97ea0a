// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of live addons.
//!
//! The addon list lives behind an [`ArcSwap`]: writers publish a new list via
//! read-copy-update, readers take an immutable snapshot. Dispatch iterates a
//! snapshot, so a concurrent register/remove/clear never changes the set of
//! addons an in-flight query is talking to.

use std::sync::Arc;

use animerge_core::AnimergeError;
use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::addon::Addon;
use crate::manifest::{validate_manifest, AddonManifest, LOADER_VERSION};

/// Immutable view of the registry at one point in time, in registration order.
pub type RegistrySnapshot = Arc<Vec<Arc<Addon>>>;

/// The set of currently loaded addons.
pub struct AddonRegistry {
    addons: ArcSwap<Vec<Arc<Addon>>>,
    supported_version: String,
}

impl AddonRegistry {
    /// An empty registry accepting [`LOADER_VERSION`] addons.
    pub fn new() -> Self {
        Self::with_supported_version(LOADER_VERSION)
    }

    /// An empty registry accepting addons built for `version`.
    pub fn with_supported_version(version: impl Into<String>) -> Self {
        Self {
            addons: ArcSwap::from_pointee(Vec::new()),
            supported_version: version.into(),
        }
    }

    /// Validate and append an addon. Returns whether it was accepted.
    ///
    /// Names are not required to be unique.
    pub fn register(&self, addon: Addon) -> bool {
        self.try_register(addon).is_ok()
    }

    /// Like [`register`](Self::register) but reports why an addon was refused.
    pub fn try_register(&self, addon: Addon) -> Result<(), AnimergeError> {
        if let Err(e) = validate_manifest(addon.manifest(), &self.supported_version) {
            warn!(addon = %addon.name(), error = %e, "addon rejected");
            return Err(e);
        }

        info!(addon = %addon.name(), "addon registered");
        let addon = Arc::new(addon);
        self.addons.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::clone(&addon));
            next
        });
        Ok(())
    }

    /// Remove every addon whose manifest name equals `name` exactly.
    ///
    /// Returns true iff at least one addon was removed.
    pub fn remove(&self, name: &str) -> bool {
        let previous = self.addons.rcu(|current| {
            current
                .iter()
                .filter(|a| a.name() != name)
                .cloned()
                .collect::<Vec<_>>()
        });

        let removed = previous.iter().filter(|a| a.name() == name).count();
        if removed > 0 {
            info!(addon = %name, removed, "addon removed");
        }
        removed > 0
    }

    /// Remove every addon.
    pub fn clear(&self) {
        self.addons.store(Arc::new(Vec::new()));
        info!("addon registry cleared");
    }

    /// Stable snapshot for one dispatch.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.addons.load_full()
    }

    /// Manifests of all live addons, in registration order.
    pub fn manifests(&self) -> Vec<AddonManifest> {
        self.addons
            .load()
            .iter()
            .map(|a| a.manifest().clone())
            .collect()
    }

    pub fn supported_version(&self) -> &str {
        &self.supported_version
    }

    /// Returns the number of registered addons.
    pub fn len(&self) -> usize {
        self.addons.load().len()
    }

    /// Returns true if no addons are registered.
    pub fn is_empty(&self) -> bool {
        self.addons.load().is_empty()
    }
}

impl Default for AddonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AddonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddonRegistry")
            .field("addons", &self.addons.load_full())
            .field("supported_version", &self.supported_version)
            .finish()
    }
}
