// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addon system for the animerge engine.
//!
//! Provides addon manifests and source parsing, the loader/validator that
//! turns source text into [`Addon`] values through registered factories, the
//! copy-on-read [`AddonRegistry`], and the built-in addon kinds.

pub mod addon;
pub mod builtin;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use addon::Addon;
pub use builtin::{StaticCatalog, StaticCatalogConfig, StaticCatalogFactory, STATIC_CATALOG_KIND};
pub use loader::{AddonFactory, AddonLoader};
pub use manifest::{parse_addon_source, validate_manifest, AddonManifest, AddonSource, LOADER_VERSION};
pub use registry::{AddonRegistry, RegistrySnapshot};
