// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query side of the animerge addon engine.
//!
//! [`AggregationEngine`] owns the addon registry and answers the five query
//! shapes by dispatching to every capable addon concurrently
//! ([`dispatch`]) and folding the answers ([`merge`]).

pub mod dispatch;
pub mod engine;
pub mod merge;

pub use dispatch::Dispatcher;
pub use engine::AggregationEngine;
pub use merge::merge_anime;
