// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-provider capability: top lists, identity lookups, and search.

use async_trait::async_trait;

use crate::error::AnimergeError;
use crate::types::{Anime, AnimeTitle, Operation, SearchParams, TopParams};

/// Capability group for descriptive metadata.
///
/// Implementors declare which of the four operations they actually serve in
/// [`operations`](Self::operations). The declaration is read once when the
/// addon is assembled; undeclared operations are never dispatched, so their
/// default bodies only matter for direct callers.
#[async_trait]
pub trait AnimeDataProvider: Send + Sync + 'static {
    /// Operations of this group the provider implements.
    fn operations(&self) -> Vec<Operation>;

    /// Returns a ranked list of titles.
    async fn get_top(&self, _params: &TopParams) -> Result<Vec<Anime>, AnimergeError> {
        Err(AnimergeError::Unsupported {
            operation: Operation::GetTop,
        })
    }

    /// Looks up a partial record by external identifiers.
    async fn get_anime_by_id(
        &self,
        _mal_id: Option<u64>,
        _anilist_id: Option<u64>,
    ) -> Result<Option<Anime>, AnimergeError> {
        Err(AnimergeError::Unsupported {
            operation: Operation::GetById,
        })
    }

    /// Looks up a partial record by title variants.
    async fn get_anime_by_name(
        &self,
        _title: &AnimeTitle,
    ) -> Result<Option<Anime>, AnimergeError> {
        Err(AnimergeError::Unsupported {
            operation: Operation::GetByName,
        })
    }

    /// Free-text search with filters.
    async fn search_anime(&self, _params: &SearchParams) -> Result<Vec<Anime>, AnimergeError> {
        Err(AnimergeError::Unsupported {
            operation: Operation::Search,
        })
    }
}
