// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregation engine: the host-facing query API.

use std::time::Duration;

use animerge_addon::{Addon, AddonFactory, AddonLoader, AddonManifest, AddonRegistry};
use animerge_core::{
    Anime, AnimeTitle, AnimergeError, SearchParams, StreamingInfo, StreamingQuery, TopParams,
};
use tracing::debug;

use crate::dispatch::Dispatcher;

/// Owns the addon registry and answers queries by fanning out to addons.
///
/// The engine is shared by reference; every method takes `&self`, and
/// registry mutations are safe to interleave with in-flight queries.
#[derive(Default)]
pub struct AggregationEngine {
    registry: AddonRegistry,
    loader: AddonLoader,
    dispatcher: Dispatcher,
}

impl AggregationEngine {
    /// An empty engine with the built-in addon kinds and no per-addon timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every addon call by `timeout`.
    pub fn with_addon_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.dispatcher = self.dispatcher.with_timeout(timeout);
        self
    }

    /// Replace the loader used by [`load_addon_from_source`](Self::load_addon_from_source).
    ///
    /// The registry is rebuilt to accept the loader's supported version, so
    /// sources and in-process addons are gated on the same version. Call this
    /// before registering any addon.
    pub fn with_loader(mut self, loader: AddonLoader) -> Self {
        self.registry = AddonRegistry::with_supported_version(loader.supported_version());
        self.loader = loader;
        self
    }

    /// Make another addon kind loadable from source.
    pub fn with_factory(mut self, factory: Box<dyn AddonFactory>) -> Self {
        self.loader.register_factory(factory);
        self
    }

    pub fn registry(&self) -> &AddonRegistry {
        &self.registry
    }

    pub fn loader(&self) -> &AddonLoader {
        &self.loader
    }

    pub fn addon_timeout(&self) -> Option<Duration> {
        self.dispatcher.timeout()
    }

    // --- registry management ---

    /// Register an addon built in-process. Returns whether it was accepted.
    pub fn register(&self, addon: Addon) -> bool {
        self.registry.register(addon)
    }

    /// Load an addon from source text and register it.
    ///
    /// Returns false (after logging) if the source is rejected; the registry
    /// is left unchanged in that case.
    pub fn load_addon_from_source(&self, source: &str) -> bool {
        self.try_load_addon_from_source(source).is_ok()
    }

    /// Like [`load_addon_from_source`](Self::load_addon_from_source) but
    /// reports why a source was refused.
    pub fn try_load_addon_from_source(&self, source: &str) -> Result<AddonManifest, AnimergeError> {
        let addon = self.loader.load(source)?;
        let manifest = addon.manifest().clone();
        self.registry.try_register(addon)?;
        Ok(manifest)
    }

    /// Remove every addon named `name`. True iff any was removed.
    pub fn remove_addon(&self, name: &str) -> bool {
        self.registry.remove(name)
    }

    pub fn clear_addons(&self) {
        self.registry.clear();
    }

    /// Manifests of the live addons, in registration order.
    pub fn addons(&self) -> Vec<AddonManifest> {
        self.registry.manifests()
    }

    // --- queries ---

    /// Top lists of every addon, concatenated in registry order.
    pub async fn get_top(&self, params: &TopParams) -> Vec<Anime> {
        let snapshot = self.registry.snapshot();
        self.dispatcher.get_top(&snapshot, params).await
    }

    /// One merged record from every addon that knows either id.
    ///
    /// At least one id must be given.
    pub async fn get_anime_by_id(
        &self,
        mal_id: Option<u64>,
        anilist_id: Option<u64>,
    ) -> Result<Option<Anime>, AnimergeError> {
        if mal_id.is_none() && anilist_id.is_none() {
            return Err(AnimergeError::InvalidQuery(
                "get_anime_by_id needs a mal_id or an anilist_id".to_string(),
            ));
        }

        let snapshot = self.registry.snapshot();
        let merged = self
            .dispatcher
            .get_anime_by_id(&snapshot, mal_id, anilist_id)
            .await;
        debug!(?mal_id, ?anilist_id, found = merged.is_some(), "anime by id");
        Ok(merged)
    }

    /// One merged record from every addon that recognizes the title.
    pub async fn get_anime_by_name(
        &self,
        title: &AnimeTitle,
    ) -> Result<Option<Anime>, AnimergeError> {
        if title.is_empty() {
            return Err(AnimergeError::InvalidQuery(
                "get_anime_by_name needs at least one title variant".to_string(),
            ));
        }

        let snapshot = self.registry.snapshot();
        let merged = self.dispatcher.get_anime_by_name(&snapshot, title).await;
        debug!(found = merged.is_some(), "anime by name");
        Ok(merged)
    }

    /// Search results of every addon, concatenated in registry order.
    pub async fn search_anime(&self, params: &SearchParams) -> Vec<Anime> {
        let snapshot = self.registry.snapshot();
        self.dispatcher.search_anime(&snapshot, params).await
    }

    /// Each addon's streaming answer for one episode, in registry order.
    ///
    /// The query must carry a title variant or an id.
    pub async fn get_streaming_info(
        &self,
        query: &StreamingQuery,
    ) -> Result<Vec<StreamingInfo>, AnimergeError> {
        if query.title.is_empty() && query.mal_id.is_none() && query.anilist_id.is_none() {
            return Err(AnimergeError::InvalidQuery(
                "get_streaming_info needs a title or an id".to_string(),
            ));
        }

        let snapshot = self.registry.snapshot();
        Ok(self.dispatcher.get_streaming_info(&snapshot, query).await)
    }
}

impl std::fmt::Debug for AggregationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregationEngine")
            .field("addons", &self.registry.len())
            .field("kinds", &self.loader.kinds())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
