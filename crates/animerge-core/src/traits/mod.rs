// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by addons.
//!
//! An addon exposes up to two capability groups. Both traits use
//! `#[async_trait]` so they can be held as `Arc<dyn ...>` trait objects.

pub mod data;
pub mod streaming;

pub use data::AnimeDataProvider;
pub use streaming::StreamingProvider;
