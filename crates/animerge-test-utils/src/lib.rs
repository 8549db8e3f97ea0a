// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for animerge integration tests.
//!
//! Provides scriptable mock addons and a harness that assembles an engine,
//! so dispatch and merge behavior can be tested without real data sources.
//!
//! # Components
//!
//! - [`MockAddon`] - Addon whose operations respond, fail, panic, or stall on demand
//! - [`TestHarness`] - Builder assembling an [`AggregationEngine`](animerge_engine::AggregationEngine)

pub mod harness;
pub mod mock_addon;

pub use harness::TestHarness;
pub use mock_addon::{MockAddon, MockBehavior};
