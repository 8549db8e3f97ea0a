// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Addon` value: a manifest plus optional capability implementations.

use std::collections::BTreeSet;
use std::sync::Arc;

use animerge_core::{AnimeDataProvider, CapabilityGroup, Operation, StreamingProvider};
use tracing::debug;

use crate::manifest::AddonManifest;

/// A loaded addon.
///
/// The set of dispatchable operations is computed whenever a provider is
/// attached, so dispatch only consults [`supports`](Self::supports) and never
/// re-queries the providers.
#[derive(Clone)]
pub struct Addon {
    manifest: AddonManifest,
    data: Option<Arc<dyn AnimeDataProvider>>,
    streaming: Option<Arc<dyn StreamingProvider>>,
    operations: BTreeSet<Operation>,
}

impl Addon {
    /// An addon with no capabilities yet.
    pub fn new(manifest: AddonManifest) -> Self {
        Self {
            manifest,
            data: None,
            streaming: None,
            operations: BTreeSet::new(),
        }
    }

    /// Attach the data-provider capability group.
    pub fn with_data_provider(mut self, provider: Arc<dyn AnimeDataProvider>) -> Self {
        self.data = Some(provider);
        self.refresh_operations();
        self
    }

    /// Attach the streaming-provider capability group.
    pub fn with_streaming_provider(mut self, provider: Arc<dyn StreamingProvider>) -> Self {
        self.streaming = Some(provider);
        self.refresh_operations();
        self
    }

    pub fn manifest(&self) -> &AddonManifest {
        &self.manifest
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn data_provider(&self) -> Option<&Arc<dyn AnimeDataProvider>> {
        self.data.as_ref()
    }

    pub fn streaming_provider(&self) -> Option<&Arc<dyn StreamingProvider>> {
        self.streaming.as_ref()
    }

    /// Operations this addon will be dispatched for, in canonical order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations.iter().copied()
    }

    /// True if the addon declares `operation` within an attached group.
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    fn refresh_operations(&mut self) {
        let mut operations = BTreeSet::new();

        let declared = [
            (
                CapabilityGroup::DataProvider,
                self.data.as_ref().map(|p| p.operations()),
            ),
            (
                CapabilityGroup::StreamingProvider,
                self.streaming.as_ref().map(|p| p.operations()),
            ),
        ];

        for (group, ops) in declared {
            for op in ops.into_iter().flatten() {
                if op.group() == group {
                    operations.insert(op);
                } else {
                    debug!(
                        addon = %self.manifest.name,
                        operation = %op,
                        group = %group,
                        "ignoring operation declared outside its capability group"
                    );
                }
            }
        }

        self.operations = operations;
    }
}

impl std::fmt::Debug for Addon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Addon")
            .field("manifest", &self.manifest)
            .field("data", &self.data.is_some())
            .field("streaming", &self.streaming.is_some())
            .field("operations", &self.operations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use animerge_core::{AnimergeError, StreamingInfo, StreamingQuery};
    use async_trait::async_trait;

    use super::*;
    use crate::manifest::LOADER_VERSION;

    struct Declares(Vec<Operation>);

    #[async_trait]
    impl AnimeDataProvider for Declares {
        fn operations(&self) -> Vec<Operation> {
            self.0.clone()
        }
    }

    struct Streams;

    #[async_trait]
    impl StreamingProvider for Streams {
        async fn get_streaming_info(
            &self,
            _query: &StreamingQuery,
        ) -> Result<Option<StreamingInfo>, AnimergeError> {
            Ok(None)
        }
    }

    fn manifest() -> AddonManifest {
        AddonManifest::new("test", "1.0.0", LOADER_VERSION)
    }

    #[test]
    fn addon_without_providers_supports_nothing() {
        let addon = Addon::new(manifest());
        assert_eq!(addon.operations().count(), 0);
        assert!(!addon.supports(Operation::GetTop));
    }

    #[test]
    fn partial_data_provider_only_exposes_declared_operations() {
        let addon = Addon::new(manifest()).with_data_provider(Arc::new(Declares(vec![
            Operation::GetById,
            Operation::Search,
        ])));
        assert!(addon.supports(Operation::GetById));
        assert!(addon.supports(Operation::Search));
        assert!(!addon.supports(Operation::GetTop));
        assert!(!addon.supports(Operation::GetStreamingInfo));
    }

    #[test]
    fn operations_outside_group_are_ignored() {
        let addon = Addon::new(manifest()).with_data_provider(Arc::new(Declares(vec![
            Operation::GetTop,
            Operation::GetStreamingInfo,
        ])));
        assert_eq!(addon.operations().collect::<Vec<_>>(), vec![Operation::GetTop]);
    }

    #[test]
    fn both_groups_combine() {
        let addon = Addon::new(manifest())
            .with_data_provider(Arc::new(Declares(vec![Operation::GetTop])))
            .with_streaming_provider(Arc::new(Streams));
        assert_eq!(
            addon.operations().collect::<Vec<_>>(),
            vec![Operation::GetTop, Operation::GetStreamingInfo]
        );
        assert!(format!("{addon:?}").contains("streaming: true"));
    }
}
