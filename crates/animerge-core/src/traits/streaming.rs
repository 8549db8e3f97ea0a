// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming-provider capability.

use async_trait::async_trait;

use crate::error::AnimergeError;
use crate::types::{Operation, StreamingInfo, StreamingQuery};

/// Capability group for playable streams.
#[async_trait]
pub trait StreamingProvider: Send + Sync + 'static {
    /// Operations of this group the provider implements.
    fn operations(&self) -> Vec<Operation> {
        Operation::STREAMING.to_vec()
    }

    /// Returns streaming availability for one episode, or `None` if this
    /// source has nothing for it.
    async fn get_streaming_info(
        &self,
        query: &StreamingQuery,
    ) -> Result<Option<StreamingInfo>, AnimergeError>;
}
