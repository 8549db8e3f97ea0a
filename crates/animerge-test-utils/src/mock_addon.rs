// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable mock addon for deterministic testing.
//!
//! `MockAddon` declares exactly the operations it has been given a behavior
//! for. Each behavior can answer with a fixed value, return an error, or
//! panic, optionally after a delay.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use animerge_addon::{Addon, AddonManifest, LOADER_VERSION};
use animerge_core::{
    Anime, AnimeDataProvider, AnimeTitle, AnimergeError, Operation, SearchParams, StreamingInfo,
    StreamingProvider, StreamingQuery, TopParams,
};

/// What a mocked operation does when called.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return this value.
    Respond(T),
    /// Return a provider error with this message.
    Fail(String),
    /// Panic with this message while being polled.
    Panic(String),
}

/// A mock addon with per-operation behaviors.
///
/// Build as many [`Addon`] values from one mock as needed; they share the
/// call counter.
#[derive(Debug, Clone)]
pub struct MockAddon {
    manifest: AddonManifest,
    delay: Option<Duration>,
    top: Option<MockBehavior<Vec<Anime>>>,
    by_id: Option<MockBehavior<Option<Anime>>>,
    by_name: Option<MockBehavior<Option<Anime>>>,
    search: Option<MockBehavior<Vec<Anime>>>,
    streaming: Option<MockBehavior<Option<StreamingInfo>>>,
    calls: Arc<AtomicUsize>,
}

impl MockAddon {
    /// A compatible mock with no operations.
    pub fn new(name: &str) -> Self {
        Self {
            manifest: AddonManifest::new(name, "0.1.0", LOADER_VERSION),
            delay: None,
            top: None,
            by_id: None,
            by_name: None,
            search: None,
            streaming: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Override the manifest's loader version.
    pub fn with_loader_ver(mut self, loader_ver: &str) -> Self {
        self.manifest.loader_ver = loader_ver.to_string();
        self
    }

    /// Sleep before every call settles.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn top(mut self, behavior: MockBehavior<Vec<Anime>>) -> Self {
        self.top = Some(behavior);
        self
    }

    pub fn by_id(mut self, behavior: MockBehavior<Option<Anime>>) -> Self {
        self.by_id = Some(behavior);
        self
    }

    pub fn by_name(mut self, behavior: MockBehavior<Option<Anime>>) -> Self {
        self.by_name = Some(behavior);
        self
    }

    pub fn search(mut self, behavior: MockBehavior<Vec<Anime>>) -> Self {
        self.search = Some(behavior);
        self
    }

    pub fn streaming(mut self, behavior: MockBehavior<Option<StreamingInfo>>) -> Self {
        self.streaming = Some(behavior);
        self
    }

    /// Answer every data operation with `anime`: top and search return it as
    /// a single-item list, by-id and by-name return it directly.
    pub fn serving(self, anime: Anime) -> Self {
        self.top(MockBehavior::Respond(vec![anime.clone()]))
            .search(MockBehavior::Respond(vec![anime.clone()]))
            .by_id(MockBehavior::Respond(Some(anime.clone())))
            .by_name(MockBehavior::Respond(Some(anime)))
    }

    /// Make every scripted operation fail with `message`.
    pub fn failing(self, message: &str) -> Self {
        let message = message.to_string();
        self.top(MockBehavior::Fail(message.clone()))
            .search(MockBehavior::Fail(message.clone()))
            .by_id(MockBehavior::Fail(message.clone()))
            .by_name(MockBehavior::Fail(message.clone()))
            .streaming(MockBehavior::Fail(message))
    }

    /// Make every scripted operation panic with `message`.
    pub fn panicking(self, message: &str) -> Self {
        let message = message.to_string();
        self.top(MockBehavior::Panic(message.clone()))
            .search(MockBehavior::Panic(message.clone()))
            .by_id(MockBehavior::Panic(message.clone()))
            .by_name(MockBehavior::Panic(message.clone()))
            .streaming(MockBehavior::Panic(message))
    }

    /// Total calls received across all operations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Assemble an addon carrying the scripted providers.
    pub fn build(&self) -> Addon {
        let provider = Arc::new(MockProvider {
            delay: self.delay,
            top: self.top.clone(),
            by_id: self.by_id.clone(),
            by_name: self.by_name.clone(),
            search: self.search.clone(),
            streaming: self.streaming.clone(),
            calls: Arc::clone(&self.calls),
        });

        let mut addon = Addon::new(self.manifest.clone());
        if !AnimeDataProvider::operations(provider.as_ref()).is_empty() {
            addon = addon.with_data_provider(Arc::clone(&provider) as Arc<dyn AnimeDataProvider>);
        }
        if provider.streaming.is_some() {
            addon = addon.with_streaming_provider(provider as Arc<dyn StreamingProvider>);
        }
        addon
    }
}

struct MockProvider {
    delay: Option<Duration>,
    top: Option<MockBehavior<Vec<Anime>>>,
    by_id: Option<MockBehavior<Option<Anime>>>,
    by_name: Option<MockBehavior<Option<Anime>>>,
    search: Option<MockBehavior<Vec<Anime>>>,
    streaming: Option<MockBehavior<Option<StreamingInfo>>>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    async fn play<T: Clone>(
        &self,
        behavior: &Option<MockBehavior<T>>,
        operation: Operation,
    ) -> Result<T, AnimergeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match behavior {
            Some(MockBehavior::Respond(value)) => Ok(value.clone()),
            Some(MockBehavior::Fail(message)) => Err(AnimergeError::provider(message.clone())),
            Some(MockBehavior::Panic(message)) => panic!("{message}"),
            None => Err(AnimergeError::Unsupported { operation }),
        }
    }
}

#[async_trait]
impl AnimeDataProvider for MockProvider {
    fn operations(&self) -> Vec<Operation> {
        [
            (Operation::GetTop, self.top.is_some()),
            (Operation::GetById, self.by_id.is_some()),
            (Operation::GetByName, self.by_name.is_some()),
            (Operation::Search, self.search.is_some()),
        ]
        .into_iter()
        .filter_map(|(op, scripted)| scripted.then_some(op))
        .collect()
    }

    async fn get_top(&self, _params: &TopParams) -> Result<Vec<Anime>, AnimergeError> {
        self.play(&self.top, Operation::GetTop).await
    }

    async fn get_anime_by_id(
        &self,
        _mal_id: Option<u64>,
        _anilist_id: Option<u64>,
    ) -> Result<Option<Anime>, AnimergeError> {
        self.play(&self.by_id, Operation::GetById).await
    }

    async fn get_anime_by_name(
        &self,
        _title: &AnimeTitle,
    ) -> Result<Option<Anime>, AnimergeError> {
        self.play(&self.by_name, Operation::GetByName).await
    }

    async fn search_anime(&self, _params: &SearchParams) -> Result<Vec<Anime>, AnimergeError> {
        self.play(&self.search, Operation::Search).await
    }
}

#[async_trait]
impl StreamingProvider for MockProvider {
    async fn get_streaming_info(
        &self,
        _query: &StreamingQuery,
    ) -> Result<Option<StreamingInfo>, AnimergeError> {
        self.play(&self.streaming, Operation::GetStreamingInfo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_only_scripted_operations() {
        let addon = MockAddon::new("m")
            .by_id(MockBehavior::Respond(None))
            .build();
        assert_eq!(addon.operations().collect::<Vec<_>>(), vec![Operation::GetById]);
        assert!(addon.streaming_provider().is_none());
    }

    #[test]
    fn loader_ver_override() {
        let addon = MockAddon::new("m").with_loader_ver("0").build();
        assert_eq!(addon.manifest().loader_ver, "0");
    }

    #[tokio::test]
    async fn counts_calls_across_builds() {
        let mock = MockAddon::new("m").failing("nope");
        let first = mock.build();
        let second = mock.build();

        let err = first
            .data_provider()
            .unwrap()
            .get_top(&TopParams::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
        let _ = second
            .streaming_provider()
            .unwrap()
            .get_streaming_info(&StreamingQuery::default())
            .await;
        assert_eq!(mock.calls(), 2);
    }
}
