// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability dispatcher.
//!
//! Every query fans out to the addons of one registry snapshot that support
//! the query's operation. Calls run concurrently and the dispatcher waits
//! for all of them. Results are collected in registry order, not completion
//! order. A failing addon (error, panic, or timeout) is logged and
//! contributes nothing; it never affects another addon's result or the
//! caller.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use animerge_addon::Addon;
use animerge_core::{
    Anime, AnimeDataProvider, AnimeTitle, AnimergeError, Operation, SearchParams, StreamingInfo,
    StreamingProvider, StreamingQuery, TopParams,
};
use futures::future::join_all;
use futures::FutureExt;
use tracing::{debug, warn};

use crate::merge::merge_anime;

/// Fans queries out to addons and folds what comes back.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// A dispatcher that waits for every addon indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound each addon call; an addon exceeding `timeout` contributes nothing.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Invoke `call` on every addon in `snapshot` that supports `operation`.
    ///
    /// Returns the successful results in registry order. Failed calls are
    /// logged at `warn` and omitted.
    pub async fn fan_out<T, F, Fut>(
        &self,
        snapshot: &[Arc<Addon>],
        operation: Operation,
        call: F,
    ) -> Vec<T>
    where
        F: Fn(Arc<Addon>) -> Fut,
        Fut: Future<Output = Result<T, AnimergeError>>,
    {
        let selected: Vec<Arc<Addon>> = snapshot
            .iter()
            .filter(|addon| addon.supports(operation))
            .cloned()
            .collect();

        debug!(
            operation = %operation,
            addons = selected.len(),
            registered = snapshot.len(),
            "dispatching"
        );
        if selected.is_empty() {
            return Vec::new();
        }

        let call = &call;
        let timeout = self.timeout;
        let calls = selected.into_iter().map(|addon| async move {
            // Both the call and its timer live inside the guarded future, so a
            // panic while building either is contained like any other.
            let invocation = AssertUnwindSafe(async {
                let pending = call(Arc::clone(&addon));
                match timeout {
                    Some(limit) => tokio::time::timeout(limit, pending)
                        .await
                        .unwrap_or(Err(AnimergeError::Timeout { duration: limit })),
                    None => pending.await,
                }
            })
            .catch_unwind();

            let result = invocation.await.unwrap_or_else(|payload| {
                Err(AnimergeError::Panicked {
                    message: panic_message(payload.as_ref()),
                })
            });

            match result {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(
                        addon = %addon.name(),
                        operation = %operation,
                        error = %e,
                        "addon call failed, contributing nothing"
                    );
                    None
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }

    /// Top lists from every addon, concatenated in registry order.
    pub async fn get_top(&self, snapshot: &[Arc<Addon>], params: &TopParams) -> Vec<Anime> {
        let lists = self
            .fan_out(snapshot, Operation::GetTop, |addon| async move {
                data_provider(&addon, Operation::GetTop)?
                    .get_top(params)
                    .await
            })
            .await;
        lists.into_iter().flatten().collect()
    }

    /// Partial records by id, merged.
    pub async fn get_anime_by_id(
        &self,
        snapshot: &[Arc<Addon>],
        mal_id: Option<u64>,
        anilist_id: Option<u64>,
    ) -> Option<Anime> {
        let partials = self
            .fan_out(snapshot, Operation::GetById, |addon| async move {
                data_provider(&addon, Operation::GetById)?
                    .get_anime_by_id(mal_id, anilist_id)
                    .await
            })
            .await;
        merge_anime(partials)
    }

    /// Partial records by title, merged.
    pub async fn get_anime_by_name(
        &self,
        snapshot: &[Arc<Addon>],
        title: &AnimeTitle,
    ) -> Option<Anime> {
        let partials = self
            .fan_out(snapshot, Operation::GetByName, |addon| async move {
                data_provider(&addon, Operation::GetByName)?
                    .get_anime_by_name(title)
                    .await
            })
            .await;
        merge_anime(partials)
    }

    /// Search results from every addon, concatenated in registry order.
    pub async fn search_anime(
        &self,
        snapshot: &[Arc<Addon>],
        params: &SearchParams,
    ) -> Vec<Anime> {
        let lists = self
            .fan_out(snapshot, Operation::Search, |addon| async move {
                data_provider(&addon, Operation::Search)?
                    .search_anime(params)
                    .await
            })
            .await;
        lists.into_iter().flatten().collect()
    }

    /// Every non-absent streaming answer, in registry order.
    pub async fn get_streaming_info(
        &self,
        snapshot: &[Arc<Addon>],
        query: &StreamingQuery,
    ) -> Vec<StreamingInfo> {
        let answers = self
            .fan_out(snapshot, Operation::GetStreamingInfo, |addon| async move {
                streaming_provider(&addon)?.get_streaming_info(query).await
            })
            .await;
        answers.into_iter().flatten().collect()
    }
}

fn data_provider(
    addon: &Addon,
    operation: Operation,
) -> Result<&Arc<dyn AnimeDataProvider>, AnimergeError> {
    addon.data_provider().ok_or(AnimergeError::Unsupported { operation })
}

fn streaming_provider(addon: &Addon) -> Result<&Arc<dyn StreamingProvider>, AnimergeError> {
    addon.streaming_provider().ok_or(AnimergeError::Unsupported {
        operation: Operation::GetStreamingInfo,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
