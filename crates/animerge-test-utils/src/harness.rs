// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for engine-level integration tests.
//!
//! `TestHarness` assembles an [`AggregationEngine`] with the requested
//! addons already registered, in the order they were added.

use std::time::Duration;

use animerge_addon::Addon;
use animerge_core::AnimergeError;
use animerge_engine::AggregationEngine;

use crate::mock_addon::MockAddon;

enum Pending {
    Addon(Addon),
    Source(String),
}

/// Builder for creating test engines with configurable options.
pub struct TestHarnessBuilder {
    pending: Vec<Pending>,
    addon_timeout: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
            addon_timeout: None,
        }
    }

    /// Register an addon built from a mock.
    pub fn with_mock(mut self, mock: &MockAddon) -> Self {
        self.pending.push(Pending::Addon(mock.build()));
        self
    }

    /// Register an already-assembled addon.
    pub fn with_addon(mut self, addon: Addon) -> Self {
        self.pending.push(Pending::Addon(addon));
        self
    }

    /// Load and register an addon from source text.
    pub fn with_source(mut self, source: &str) -> Self {
        self.pending.push(Pending::Source(source.to_string()));
        self
    }

    /// Bound every addon call.
    pub fn with_addon_timeout(mut self, timeout: Duration) -> Self {
        self.addon_timeout = Some(timeout);
        self
    }

    /// Build the harness. Fails if any addon or source is rejected.
    pub fn build(self) -> Result<TestHarness, AnimergeError> {
        let engine = AggregationEngine::new().with_addon_timeout(self.addon_timeout);

        for pending in self.pending {
            match pending {
                Pending::Addon(addon) => engine.registry().try_register(addon)?,
                Pending::Source(source) => {
                    engine.try_load_addon_from_source(&source)?;
                }
            }
        }

        Ok(TestHarness { engine })
    }
}

/// A ready-to-query engine.
pub struct TestHarness {
    pub engine: AggregationEngine,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use animerge_core::{Anime, TopParams};

    use super::*;
    use crate::mock_addon::MockBehavior;

    #[tokio::test]
    async fn registers_in_builder_order() {
        let harness = TestHarness::builder()
            .with_mock(&MockAddon::new("a").top(MockBehavior::Respond(vec![Anime::default()])))
            .with_mock(&MockAddon::new("b").top(MockBehavior::Respond(Vec::new())))
            .build()
            .unwrap();

        let names: Vec<_> = harness.engine.addons().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(harness.engine.get_top(&TopParams::default()).await.len(), 1);
    }

    #[test]
    fn rejected_addon_fails_the_build() {
        let result = TestHarness::builder()
            .with_mock(&MockAddon::new("old").with_loader_ver("0"))
            .build();
        assert!(matches!(
            result,
            Err(AnimergeError::IncompatibleLoaderVersion { .. })
        ));
    }
}
