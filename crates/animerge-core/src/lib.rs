// SPDX-FileCopyrightText: 2026 Animerge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the animerge addon engine.
//!
//! This crate provides the domain types (records, titles, query parameters),
//! the capability traits every addon implements, and the shared error type.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AnimergeError;
pub use traits::{AnimeDataProvider, StreamingProvider};
pub use types::{
    Anime, AnimeTitle, AnimeType, CapabilityGroup, Operation, SearchParams, StreamingInfo,
    StreamingQuery, TopParams,
};
